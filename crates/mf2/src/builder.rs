//! Receivers for the nodes produced by the parser.

use crate::model::{Body, Declaration, MFDataModel, Pattern};

/// Receives the top-level pieces of a message as the parser completes them.
///
/// Declarations arrive in source order; the body arrives once, last. On a
/// fatal error the builder keeps whatever it received before the failure.
pub trait MessageBuilder {
    fn add_declaration(&mut self, declaration: Declaration);

    fn set_body(&mut self, body: Body);
}

/// Builds an in-memory [`MFDataModel`].
#[derive(Debug, Default)]
pub struct DataModelBuilder {
    declarations: Vec<Declaration>,
    body: Option<Body>,
}

impl DataModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes the model. A builder that never received a body produces an
    /// empty pattern.
    pub fn build(self) -> MFDataModel {
        MFDataModel {
            declarations: self.declarations,
            body: self
                .body
                .unwrap_or_else(|| Body::Pattern(Pattern::default())),
        }
    }
}

impl MessageBuilder for DataModelBuilder {
    fn add_declaration(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    fn set_body(&mut self, body: Body) {
        self.body = Some(body);
    }
}
