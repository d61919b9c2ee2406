//! Linear regression pipeline: feature/target extraction, seeded hold-out
//! split, and an ordinary-least-squares fit.

pub mod design;
pub mod ols;
pub mod split;

pub use design::{Design, feature_names};
pub use ols::{LinearRegression, r2_score};
pub use split::{TrainTestSplit, train_test_split};
