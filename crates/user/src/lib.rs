mod cook;
mod pantry;
mod plan;

pub use cook::*;
pub use pantry::*;
pub use plan::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod query;

        pub use command::*;
        pub use query::*;
    }
}
