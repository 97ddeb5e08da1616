mod browse;
mod create;
mod engine;
mod fallback;
mod import;
mod normalize;
mod terms;

pub use browse::*;
pub use create::*;
pub use engine::*;
pub use fallback::catalog as fallback_catalog;
pub use import::*;
pub use normalize::normalize;
pub use terms::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod query;

        pub use command::*;
        pub use query::*;
    }
}
