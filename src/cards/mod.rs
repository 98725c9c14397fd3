//! Card aggregate: the card and the value objects printed on it.
//!
//! ## Key Types
//!
//! - `Card`: one printed card, immutable once built
//! - `CardBuilder`: assembles a card through type-gated setters
//! - `CardRecord`: flat JSON input, replayed through the builder
//! - `Attack` / `Ability`: what a Pokémon can do
//! - `EnergyProvision`: what an energy card provides
//! - `Evolution`: links to previous and next stages
//!
//! Every value object validates on construction, so a `Card` only ever
//! holds valid parts.

pub mod ability;
pub mod attack;
pub mod builder;
pub mod card;
pub mod energy;
pub mod evolution;

pub use ability::Ability;
pub use attack::{Attack, EnergyCost};
pub use builder::CardBuilder;
pub use card::{Card, CardDetails, CardRecord, EnergyDetails, PokemonDetails, TrainerDetails};
pub use energy::EnergyProvision;
pub use evolution::Evolution;
