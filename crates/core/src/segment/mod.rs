//! Word segmentation over a frozen vocabulary.

pub mod greedy;

pub use greedy::GreedySegmenter;
