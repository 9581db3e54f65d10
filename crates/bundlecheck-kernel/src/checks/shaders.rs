use bundlecheck_types::{BuildContext, CheckError, CheckOutcome};

use super::Check;
use crate::loadable::load_each;
use crate::shader::ShaderRuntime;

/// Every shader program compiles; one outcome per program.
///
/// A missing graphics context fails every program rather than skipping.
pub struct ShadersCheck {
    programs: Vec<String>,
    runtime: Box<dyn ShaderRuntime>,
}

impl ShadersCheck {
    pub fn new(programs: Vec<String>, runtime: Box<dyn ShaderRuntime>) -> Self {
        Self { programs, runtime }
    }
}

impl Check for ShadersCheck {
    fn name(&self) -> &str {
        "shaders"
    }

    fn run(&self, _ctx: &BuildContext) -> Vec<CheckOutcome> {
        if let Err(reason) = self.runtime.context() {
            tracing::error!(%reason, "no graphics context for shader compilation");
            return self
                .programs
                .iter()
                .map(|shader| {
                    let err = CheckError::GraphicsContextUnavailable {
                        shader: shader.clone(),
                        reason: reason.clone(),
                    };
                    CheckOutcome::failed(format!("shader:{shader}"), &err)
                })
                .collect();
        }

        load_each("shader", self.runtime.as_ref(), &self.programs, |shader, source| {
            CheckError::ShaderCompileFailure {
                shader: shader.to_string(),
                source,
            }
        })
    }
}
