mod arena;
mod layout;
mod loading;
mod select_character;
mod wallet_button;

pub use arena::Arena;
pub use layout::Layout;
pub use loading::LoadingIndicator;
pub use select_character::SelectCharacter;
pub use wallet_button::WalletButton;
