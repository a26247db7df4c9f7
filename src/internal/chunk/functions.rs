pub mod plan_chunks;
