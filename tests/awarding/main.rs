//! Integration tests for evaluation, granting and the catalog.

mod support;

mod concurrency;
mod grant;
mod unavailable;
