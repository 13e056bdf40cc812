use crate::config::Config;
use crate::corpus::PuzzleId;
use crate::error::{Result, StubcheckError};
use crate::tool::{StubGeneration, StubTool};
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

/// Config whose stub tool is a shell script standing in for `coctus`.
///
/// `next <id>` stores the id; `generate-stub <lang>` runs `stub_body` with
/// `$id` and `$lang` set. The script is run through `sh` rather than executed
/// directly so a concurrently forking test can't make it "text file busy".
pub(crate) fn fake_tool_config(dir: &Path, stub_body: &str) -> Config {
    let script_path = dir.join("fake-tool.sh");
    let script = format!(
        "state=\"{state}\"\n\
         case \"$1\" in\n\
           next) echo \"$2\" > \"$state\" ;;\n\
           generate-stub) id=$(cat \"$state\"); lang=\"$2\"; {body} ;;\n\
           *) echo \"unknown command $1\" >&2; exit 64 ;;\n\
         esac\n",
        state = dir.join("current").display(),
        body = stub_body,
    );
    std::fs::write(&script_path, script).unwrap();

    let script_path = script_path.to_string_lossy().into_owned();
    Config {
        tool: "sh".to_string(),
        select_args: vec![script_path.clone(), "next".to_string(), "{id}".to_string()],
        stub_args: vec![
            script_path,
            "generate-stub".to_string(),
            "{lang}".to_string(),
        ],
        ..Config::default()
    }
}

/// Cache directory holding one `<id>.json` file per id.
pub(crate) fn create_corpus(ids: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for id in ids {
        std::fs::write(temp_dir.path().join(format!("{}.json", id)), "{}").unwrap();
    }
    temp_dir
}

/// In-memory [`StubTool`] with a scripted response per (puzzle, language).
///
/// Unscripted pairs fall back to `default`. Every call is recorded so tests
/// can assert on ordering.
pub(crate) struct ScriptedTool {
    current: Option<PuzzleId>,
    responses: HashMap<(String, String), StubGeneration>,
    default: Box<dyn Fn(&PuzzleId, &str) -> StubGeneration>,
    pub(crate) calls: Vec<String>,
    pub(crate) fail_select: bool,
}

impl ScriptedTool {
    pub(crate) fn new(default: impl Fn(&PuzzleId, &str) -> StubGeneration + 'static) -> Self {
        Self {
            current: None,
            responses: HashMap::new(),
            default: Box::new(default),
            calls: Vec::new(),
            fail_select: false,
        }
    }

    /// Tool that returns the same generation for every request.
    pub(crate) fn always(generation: StubGeneration) -> Self {
        Self::new(move |_, _| generation.clone())
    }

    pub(crate) fn respond(
        mut self,
        puzzle: &str,
        language: &str,
        generation: StubGeneration,
    ) -> Self {
        self.responses
            .insert((puzzle.to_string(), language.to_string()), generation);
        self
    }
}

impl StubTool for ScriptedTool {
    fn select(&mut self, puzzle: &PuzzleId) -> Result<()> {
        self.calls.push(format!("select {}", puzzle));
        if self.fail_select {
            return Err(StubcheckError::UserError(format!(
                "selecting puzzle {} failed",
                puzzle
            )));
        }
        self.current = Some(puzzle.clone());
        Ok(())
    }

    fn generate_stub(&mut self, language: &str) -> StubGeneration {
        let Some(puzzle) = self.current.clone() else {
            return StubGeneration::Failed {
                detail: "no current puzzle".to_string(),
            };
        };
        self.calls.push(format!("stub {} {}", puzzle, language));

        let key = (puzzle.as_str().to_string(), language.to_string());
        match self.responses.get(&key) {
            Some(generation) => generation.clone(),
            None => (self.default)(&puzzle, language),
        }
    }
}
