use tracing::debug;

use crate::{CoreConfig, CoreResult, Fatal};

/// The evaluation context threaded through every operation
///
/// A `Core` is cheap to share by reference. Operators handed to the
/// combinators receive it back so they can re-enter the core.
#[derive(Debug, Clone, Default)]
pub struct Core {
    config: CoreConfig,
}

impl Core {
    pub fn new(config: CoreConfig) -> Self {
        debug!(?config, "creating evaluation core");
        Core { config }
    }
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
    /// Check that a container of `elements` elements may be built
    pub(crate) fn validate_size(&self, elements: usize) -> CoreResult<usize> {
        if elements > self.config.max_elements {
            debug!(elements, limit = self.config.max_elements, "allocation refused");
            return Err(Fatal::Alloc { elements });
        }
        Ok(elements)
    }
    /// Check the tally of a shape that is about to be allocated
    pub(crate) fn validate_shape(&self, shape: &crate::Shape) -> CoreResult<usize> {
        match shape.checked_tally() {
            Some(n) => self.validate_size(n),
            None => Err(Fatal::Alloc {
                elements: usize::MAX,
            }),
        }
    }
}
