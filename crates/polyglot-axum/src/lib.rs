//! Internationalization middleware for axum
//!
//! [`I18nLayer`] loads one bundle file per accepted language at
//! construction, then attaches the shared state to every request. Handlers
//! localize messages through [`localize`], [`must_localize`] or the
//! [`I18n`] extractor; the request language comes from the `lang` query
//! parameter, then the `Accept-Language` header, then the default language.
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use polyglot_axum::{Config, I18n, I18nLayer, LocalizeRejection};
//!
//! async fn welcome(i18n: I18n) -> Result<String, LocalizeRejection> {
//!     Ok(i18n.localize("welcome")?)
//! }
//!
//! let app: Router = Router::new()
//!     .route("/", get(welcome))
//!     .layer(I18nLayer::new(Config::new().with_root_path("./localize")));
//! ```

pub mod config;
pub mod handler;
pub mod localize;
pub mod middleware;

pub use config::{Config, LangHandler, ResolvedConfig};
pub use handler::default_lang_handler;
pub use localize::{localize, must_localize, I18n, LocalizeRejection};
pub use middleware::{I18nLayer, I18nService, I18nState};

pub use polyglot_i18n::{localize_config, LocalizeConfig, LocalizeError, MessageRequest};
