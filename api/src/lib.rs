pub mod abi;
pub mod battle;
pub mod contract;
pub mod error;
pub mod model;
pub mod rpc;
pub mod session;
pub mod view;

pub mod prelude {
    pub use crate::abi;
    pub use crate::battle::{AttackPhase, AttackTracker};
    pub use crate::contract::GameContract;
    pub use crate::error::{AbiError, Error};
    pub use crate::model::{
        Address, BossSnapshot, BossTemplate, CharacterSnapshot, CharacterTemplate,
        BOSS_TEMPLATE, CHARACTER_TEMPLATES,
    };
    pub use crate::rpc::{EthProvider, TransactionReceipt};
    pub use crate::session::{Session, SessionEvent};
    pub use crate::view::{select_screen, Screen};
}
