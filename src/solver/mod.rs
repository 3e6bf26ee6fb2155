pub mod greedy;
