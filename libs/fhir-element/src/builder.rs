//! Builder plumbing shared by every model type
//!
//! Each model type has its own staged builder; this module holds the pieces
//! they all share: the per-builder validation switch, the list-append
//! argument check, and the final build step that hands a freshly
//! constructed node to the validation engine.

use crate::element::Element;
use crate::error::{Error, Result};
use crate::validation::{validate_tree, ValidatorSettings};

/// Whether `build` runs the rule battery for this builder.
///
/// This replaces a process-wide flag: the escape hatch is chosen where the
/// builder is created and travels with it, nothing global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Enforced,
    Disabled,
}

/// Rejects the null-equivalent placeholder on list appends. The append
/// setters promise the resulting list never contains empty entries.
pub fn check_list_element(field: &str, element: &dyn Element) -> Result<()> {
    if element.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{}: empty element appended to list field",
            field
        )));
    }
    Ok(())
}

/// Final step of every `build`: run the validation engine over the newly
/// constructed node unless this builder opted out. The node is returned
/// untouched; violations are reported, never repaired.
pub fn finish_build<T: Element>(node: T, mode: ValidationMode) -> Result<T> {
    if mode == ValidationMode::Disabled {
        return Ok(node);
    }
    let outcome = validate_tree(node.type_name(), &node, &ValidatorSettings::default());
    if outcome.valid {
        Ok(node)
    } else {
        Err(Error::ValidationFailed(outcome))
    }
}

/// Setters present on every builder: element id, extension staging and the
/// validation switch. Expects `id`, `extension` and `mode` fields on the
/// builder struct.
#[macro_export]
macro_rules! builder_common {
    () => {
        /// Id for the node under construction.
        pub fn id(mut self, id: impl Into<String>) -> Self {
            self.id = Some(id.into());
            self
        }

        /// Append one extension. Empty extensions are rejected.
        pub fn add_extension(
            mut self,
            extension: $crate::datatypes::Extension,
        ) -> $crate::error::Result<Self> {
            $crate::builder::check_list_element("extension", &extension)?;
            self.extension.push(extension);
            Ok(self)
        }

        /// Replace the extension list.
        pub fn extensions(
            mut self,
            extensions: impl IntoIterator<Item = $crate::datatypes::Extension>,
        ) -> Self {
            self.extension = extensions.into_iter().collect();
            self
        }

        /// Choose whether `build` runs the validation engine.
        pub fn validation(mut self, mode: $crate::builder::ValidationMode) -> Self {
            self.mode = mode;
            self
        }
    };
}
