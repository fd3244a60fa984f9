pub mod agglomerative;
pub mod cluster_keywords;
pub mod label;
pub mod manual_overlay;
pub mod normalize;
pub mod opportunity_score;
pub mod promotion;
