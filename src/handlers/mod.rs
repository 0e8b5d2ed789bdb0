//! Command handlers exposed by the achievement service.
//!
//! | Command          | Who                                   |
//! |------------------|---------------------------------------|
//! | `evaluate`       | self; instructors/admins for others   |
//! | `catalog.list`   | self; instructors/admins for others   |
//! | `catalog.create` | admins                                |
//! | `grant`          | instructors/admins                    |

use crate::awarder::Awarder;
use crate::microsvc::Service;
use crate::store::ProgressStore;

pub mod catalog_create;
pub mod catalog_list;
pub mod evaluate;
pub mod grant;

/// Build a service over `store` with every achievement command registered.
pub fn service<S: ProgressStore + 'static>(store: S) -> Service<Awarder<S>> {
    crate::register_handlers!(
        Service::new(Awarder::new(store)),
        evaluate,
        catalog_list,
        catalog_create,
        grant,
    )
}
