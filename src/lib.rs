pub mod export;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod rating;
pub mod scorecard;
pub mod season;
pub mod store;
pub mod tots;
