//! Shader program loading.
//!
//! A program `<name>` is a vertex and a fragment stage stored as
//! `<name>_vertex.glsl` and `<name>_fragment.glsl` in the bundle's shader
//! directory. Stages may pull in shared snippets with
//! `#pragma <app>_include_shader <file.glsl>`.

use std::path::{Path, PathBuf};

use bundlecheck_types::LoadError;

use crate::Loadable;

/// Program stages, in load order.
pub const STAGES: &[&str] = &["vertex", "fragment"];

/// Nesting limit for include directives.
const MAX_INCLUDE_DEPTH: usize = 16;

/// The runtime's shader-loading entry point.
pub trait ShaderRuntime: Loadable {
    /// Whether a graphics context is available; the reason if not.
    fn context(&self) -> Result<(), String>;
}

/// Loads shader programs from source files, expanding includes.
///
/// Needs no GPU, so its context is always available.
#[derive(Debug, Clone)]
pub struct SourceShaderRuntime {
    dir: PathBuf,
    include_pragma: String,
}

impl SourceShaderRuntime {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            dir: dir.into(),
            include_pragma: format!("#pragma {app_name}_include_shader"),
        }
    }

    /// Fully expanded source of one stage of a program.
    pub fn stage_source(&self, program: &str, stage: &str) -> Result<String, LoadError> {
        let path = self.dir.join(format!("{program}_{stage}.glsl"));
        let mut stack = Vec::new();
        self.expand(&path, &mut stack)
    }

    fn expand(&self, path: &Path, stack: &mut Vec<PathBuf>) -> Result<String, LoadError> {
        if stack.iter().any(|p| p == path) {
            return Err(LoadError::Invalid(format!(
                "include cycle through {}",
                path.display()
            )));
        }
        if stack.len() >= MAX_INCLUDE_DEPTH {
            return Err(LoadError::Invalid(format!(
                "includes nested deeper than {MAX_INCLUDE_DEPTH} at {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        stack.push(path.to_path_buf());

        let mut out = String::with_capacity(text.len());
        for line in text.lines() {
            match self.include_target(line) {
                Some(target) => {
                    let included = self.expand(&self.dir.join(target), stack)?;
                    out.push_str(&included);
                }
                None => out.push_str(line),
            }
            out.push('\n');
        }

        stack.pop();
        Ok(out)
    }

    /// The file named by an include directive, if `line` is one.
    fn include_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.trim_start().strip_prefix(self.include_pragma.as_str())?;
        let target = rest
            .trim()
            .trim_start_matches(|c| c == '<' || c == '"')
            .trim_end_matches(|c| c == '>' || c == '"');
        (!target.is_empty()).then_some(target)
    }
}

/// A compilable stage has non-blank source with a `main` entry point.
fn validate_stage(program: &str, stage: &str, source: &str) -> Result<(), LoadError> {
    if source.trim().is_empty() {
        return Err(LoadError::Invalid(format!("{program} {stage} stage is empty")));
    }
    let squashed: String = source.split_whitespace().collect();
    if !squashed.contains("voidmain(") {
        return Err(LoadError::Invalid(format!(
            "{program} {stage} stage has no main entry point"
        )));
    }
    Ok(())
}

impl Loadable for SourceShaderRuntime {
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        for stage in STAGES {
            let source = self.stage_source(name, stage)?;
            validate_stage(name, stage, &source)?;
        }
        tracing::debug!(program = name, "shader program loaded");
        Ok(())
    }

    fn describe(&self, name: &str) -> String {
        format!("{name} compiled ({})", STAGES.join(" + "))
    }
}

impl ShaderRuntime for SourceShaderRuntime {
    fn context(&self) -> Result<(), String> {
        Ok(())
    }
}
