//! View collaborators for bsnav helpers.
//!
//! The navigation helpers delegate everything that is not tree traversal to
//! small services defined here. Each service is a trait with a default
//! implementation:
//!
//! | Trait | Default |
//! |-------|---------|
//! | [`Escaper`] | [`HtmlEscaper`] |
//! | [`Translator`] | [`MapTranslator`] |
//! | [`Authorization`] | [`RoleAuthorization`] |
//! | [`AcceptHelperFactory`] | [`DefaultAcceptHelperFactory`] |
//! | [`HtmlElement`] | [`ElementBuilder`] |
//! | [`Htmlify`] | [`LinkBuilder`] |
//! | [`PartialRenderer`] | [`TemplateRegistry`] |
//!
//! With the `mock` feature, [`RecordingPartialRenderer`] records partial
//! calls for tests.

mod accept;
mod element;
mod escape;
mod htmlify;
#[cfg(feature = "mock")]
mod mock;
mod partial;
mod translate;

pub use accept::{
    AcceptHelper, AcceptHelperFactory, AcceptOptions, AcceptPage, Authorization,
    DefaultAcceptHelperFactory, RoleAuthorization, ServiceError,
};
pub use element::{Attributes, ElementBuilder, HtmlElement};
pub use escape::{Escaper, HtmlEscaper, escape_html};
pub use htmlify::{Htmlify, LinkBuilder, LinkOptions};
#[cfg(feature = "mock")]
pub use mock::RecordingPartialRenderer;
pub use partial::{Partial, PartialError, PartialRenderer, TemplateRegistry, ViewModel};
pub use translate::{MapTranslator, Translator, translate};
