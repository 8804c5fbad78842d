pub mod swap_swarm;
pub use swap_swarm as c001_a001;
