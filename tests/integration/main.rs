//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  Time is injected through `ManualClock`, so
//! boost scenarios run without sleeping.

mod host_adapter_tests;
mod mock_hw;
mod scheduler_tests;
