pub mod optimization;

pub use optimization::{
    compare, dfp_minimize, gradient_descent_minimize, minimize, newton_minimize,
    LineSearchConfig, Method, ObjectiveFunction, OptimizationConfig, OptimizationResult, Status,
};
