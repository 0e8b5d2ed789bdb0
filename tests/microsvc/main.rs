//! microsvc integration tests for the achievement commands.

mod support;
mod dispatch;
