//! Built-in interactors.
//!
//! | Name       | Trigger             | Effect                                   |
//! |------------|---------------------|------------------------------------------|
//! | `pauser`   | click mode `pause`  | toggles playing / paused                 |
//! | `pusher`   | click mode `push`   | adds particles at the click position     |
//! | `remover`  | click mode `remove` | removes the oldest particles             |
//! | `repulser` | hover mode `repulse`| pushes particles away from the pointer   |
//! | `collider` | `collisions.enable` | bounces or destroys touching particles   |

mod collider;
mod pauser;
mod pusher;
mod remover;
mod repulser;

pub use collider::Collider;
pub use pauser::Pauser;
pub use pusher::Pusher;
pub use remover::Remover;
pub use repulser::Repulser;

use crate::container::ContainerCore;
use crate::interactor::{Interactor, InteractorInitializer};
use std::sync::Arc;

/// Interactors every engine registers on `init`, by name.
pub fn builtins() -> Vec<(&'static str, InteractorInitializer)> {
    fn pauser(_: &ContainerCore) -> Box<dyn Interactor> {
        Box::new(Pauser)
    }
    fn pusher(core: &ContainerCore) -> Box<dyn Interactor> {
        Box::new(Pusher::new(core))
    }
    fn remover(core: &ContainerCore) -> Box<dyn Interactor> {
        Box::new(Remover::new(core))
    }
    fn repulser(core: &ContainerCore) -> Box<dyn Interactor> {
        Box::new(Repulser::new(core))
    }
    fn collider(core: &ContainerCore) -> Box<dyn Interactor> {
        Box::new(Collider::new(core))
    }

    vec![
        ("pauser", Arc::new(pauser) as InteractorInitializer),
        ("pusher", Arc::new(pusher) as InteractorInitializer),
        ("remover", Arc::new(remover) as InteractorInitializer),
        ("repulser", Arc::new(repulser) as InteractorInitializer),
        ("collider", Arc::new(collider) as InteractorInitializer),
    ]
}
