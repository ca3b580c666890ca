mod cli;

pub mod prelude {
    pub use super::cli::{predict_root, PredictArgs};
}
