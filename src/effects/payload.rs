//! Effect payloads.
//!
//! Payloads are the data carried by one effect discriminant. Several
//! discriminants share a payload shape (`HEAL` and `LOOK_AT_DECK` both carry
//! an amount and a target), so the shapes live here and the three effect
//! unions wrap them.
//!
//! Invariants are carried by the types where possible (`NonZeroU32` for
//! amounts that must be at least one). The two payloads with cross-field
//! invariants, `InflictStatus` and `MoveDamageCounters`, keep their fields
//! private behind a validating constructor.

use std::num::{NonZeroI32, NonZeroU32};

use crate::core::{EffectTarget, EnergySource, EnergyType, SpecialCondition, Vocabulary};
use crate::error::ValidationError;
use crate::rules::Condition;

use super::fields::{FieldReader, RawEffect};

/// A payload shape that can be read from and written to a field record.
pub trait EffectPayload: Sized {
    /// Read the payload's fields. Unread fields are rejected by the caller.
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError>;

    /// Append the payload's fields to a record.
    fn write(&self, raw: RawEffect) -> RawEffect;
}

/// Decode a payload, rejecting fields the payload does not use.
pub(crate) fn decode<P: EffectPayload>(raw: &RawEffect) -> Result<P, ValidationError> {
    let mut reader = FieldReader::new(&raw.effect_type, &raw.fields);
    let payload = P::read(&mut reader)?;
    reader.finish()?;
    Ok(payload)
}

/// Encode a payload under a discriminant.
pub(crate) fn encode<P: EffectPayload>(effect_type: &str, payload: &P) -> RawEffect {
    payload.write(RawEffect::new(effect_type))
}

/// Discriminants with no payload (`DISCARD_HAND`).
impl EffectPayload for () {
    fn read(_reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(())
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw
    }
}

fn nz(value: u32, owner: &str, field: &str) -> Result<NonZeroU32, ValidationError> {
    NonZeroU32::new(value)
        .ok_or_else(|| ValidationError::invariant(owner, format!("`{field}` must be >= 1, got 0")))
}

/// A bare count: cards drawn, recoil damage, attack boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Amount {
    pub amount: NonZeroU32,
}

impl Amount {
    pub fn new(amount: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: nz(amount, "Amount", "amount")?,
        })
    }

    #[must_use]
    pub fn get(&self) -> u32 {
        self.amount.get()
    }
}

impl EffectPayload for Amount {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: reader.positive("amount")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("amount", self.amount.get())
    }
}

/// A target only: switching, attack/retreat lockout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Targeted {
    pub target: EffectTarget,
}

impl EffectPayload for Targeted {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            target: reader.enum_value("target")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("target", self.target.as_str())
    }
}

/// A count applied to a target: heal, discard cards, look at deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetedAmount {
    pub amount: NonZeroU32,
    pub target: EffectTarget,
}

impl TargetedAmount {
    pub fn new(amount: u32, target: EffectTarget) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: nz(amount, "TargetedAmount", "amount")?,
            target,
        })
    }
}

impl EffectPayload for TargetedAmount {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: reader.positive("amount")?,
            target: reader.enum_value("target")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("amount", self.amount.get())
            .with("target", self.target.as_str())
    }
}

/// Search the deck or discard pile for cards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardSearch {
    pub amount: NonZeroU32,
    /// Free-text filter such as "Basic Pokémon"; `None` means any card.
    pub card_filter: Option<String>,
}

impl EffectPayload for CardSearch {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: reader.positive("amount")?,
            card_filter: reader.opt_text("cardFilter")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("amount", self.amount.get())
            .with_opt("cardFilter", self.card_filter.clone())
    }
}

/// Energy moved to or from a target: discard energy, attach from discard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnergyTransfer {
    pub amount: NonZeroU32,
    pub target: EffectTarget,
    /// `None` means energy of any type.
    pub energy_type: Option<EnergyType>,
}

impl EnergyTransfer {
    pub fn new(
        amount: u32,
        target: EffectTarget,
        energy_type: Option<EnergyType>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: nz(amount, "EnergyTransfer", "amount")?,
            target,
            energy_type,
        })
    }
}

impl EffectPayload for EnergyTransfer {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: reader.positive("amount")?,
            target: reader.enum_value("target")?,
            energy_type: reader.opt_enum("energyType")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("amount", self.amount.get())
            .with("target", self.target.as_str())
            .with_opt("energyType", self.energy_type.map(EnergyType::as_str))
    }
}

/// Energy cards returned from the discard pile to hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnergyRetrieval {
    pub amount: NonZeroU32,
    pub energy_type: Option<EnergyType>,
}

impl EffectPayload for EnergyRetrieval {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: reader.positive("amount")?,
            energy_type: reader.opt_enum("energyType")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("amount", self.amount.get())
            .with_opt("energyType", self.energy_type.map(EnergyType::as_str))
    }
}

/// Extra energy attached from somewhere other than the hand-per-turn drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnergyAcceleration {
    pub amount: NonZeroU32,
    pub source: EnergySource,
    pub target: EffectTarget,
    pub energy_type: Option<EnergyType>,
}

impl EffectPayload for EnergyAcceleration {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: reader.positive("amount")?,
            source: reader.enum_value("source")?,
            target: reader.enum_value("target")?,
            energy_type: reader.opt_enum("energyType")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("amount", self.amount.get())
            .with("source", self.source.as_str())
            .with("target", self.target.as_str())
            .with_opt("energyType", self.energy_type.map(EnergyType::as_str))
    }
}

/// Inflict a special condition.
///
/// `poison_damage` overrides the usual 10 damage per checkup and is only
/// meaningful for POISONED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InflictStatus {
    condition: SpecialCondition,
    target: EffectTarget,
    coin_flip: bool,
    poison_damage: Option<NonZeroU32>,
}

impl InflictStatus {
    #[must_use]
    pub fn new(condition: SpecialCondition, target: EffectTarget) -> Self {
        Self {
            condition,
            target,
            coin_flip: false,
            poison_damage: None,
        }
    }

    /// Only applies on heads.
    #[must_use]
    pub fn with_coin_flip(mut self) -> Self {
        self.coin_flip = true;
        self
    }

    /// Set custom poison damage. Fails for conditions other than POISONED.
    pub fn with_poison_damage(mut self, damage: u32) -> Result<Self, ValidationError> {
        if self.condition != SpecialCondition::Poisoned {
            return Err(ValidationError::invariant(
                "STATUS_CONDITION",
                format!("`poisonDamage` requires POISONED, got {}", self.condition),
            ));
        }
        self.poison_damage = Some(nz(damage, "STATUS_CONDITION", "poisonDamage")?);
        Ok(self)
    }

    #[must_use]
    pub fn condition(&self) -> SpecialCondition {
        self.condition
    }

    #[must_use]
    pub fn target(&self) -> EffectTarget {
        self.target
    }

    #[must_use]
    pub fn coin_flip(&self) -> bool {
        self.coin_flip
    }

    #[must_use]
    pub fn poison_damage(&self) -> Option<u32> {
        self.poison_damage.map(NonZeroU32::get)
    }
}

impl EffectPayload for InflictStatus {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        let mut status = InflictStatus::new(reader.enum_value("condition")?, reader.enum_value("target")?);
        if reader.flag("coinFlip", false)? {
            status = status.with_coin_flip();
        }
        if let Some(damage) = reader.opt_count("poisonDamage")? {
            status = status.with_poison_damage(damage)?;
        }
        Ok(status)
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        let raw = raw
            .with("condition", self.condition.as_str())
            .with("target", self.target.as_str())
            .with_opt("poisonDamage", self.poison_damage());
        if self.coin_flip {
            raw.with("coinFlip", true)
        } else {
            raw
        }
    }
}

/// Change the attack's damage, optionally only while a condition holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DamageModifier {
    pub modifier: NonZeroI32,
    pub condition: Option<Condition>,
}

impl EffectPayload for DamageModifier {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        let modifier = reader.signed("modifier")?;
        let modifier = NonZeroI32::new(modifier).ok_or_else(|| {
            ValidationError::invariant(reader.owner(), "`modifier` must not be 0")
        })?;
        Ok(Self {
            modifier,
            condition: reader.opt_condition("condition")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("modifier", self.modifier.get())
            .with_opt("condition", self.condition)
    }
}

/// Prevent damage done to a target during the opponent's next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PreventDamage {
    pub target: EffectTarget,
    /// `None` prevents all damage.
    pub amount: Option<NonZeroU32>,
    pub coin_flip: bool,
}

impl EffectPayload for PreventDamage {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            target: reader.enum_value("target")?,
            amount: reader.opt_positive("amount")?,
            coin_flip: reader.flag("coinFlip", false)?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        let raw = raw
            .with("target", self.target.as_str())
            .with_opt("amount", self.amount.map(NonZeroU32::get));
        if self.coin_flip {
            raw.with("coinFlip", true)
        } else {
            raw
        }
    }
}

/// Move damage counters from one Pokémon to another.
///
/// The only two-target payload: source and destination must differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveDamageCounters {
    source_target: EffectTarget,
    destination_target: EffectTarget,
    amount: NonZeroU32,
    prevent_knockout: bool,
}

impl MoveDamageCounters {
    /// `prevent_knockout` defaults to true on the wire.
    pub fn new(
        source_target: EffectTarget,
        destination_target: EffectTarget,
        amount: u32,
        prevent_knockout: bool,
    ) -> Result<Self, ValidationError> {
        if source_target == destination_target {
            return Err(ValidationError::invariant(
                "MOVE_DAMAGE_COUNTER",
                format!("`sourceTarget` and `destinationTarget` must differ, both are {source_target}"),
            ));
        }
        Ok(Self {
            source_target,
            destination_target,
            amount: nz(amount, "MOVE_DAMAGE_COUNTER", "amount")?,
            prevent_knockout,
        })
    }

    #[must_use]
    pub fn source_target(&self) -> EffectTarget {
        self.source_target
    }

    #[must_use]
    pub fn destination_target(&self) -> EffectTarget {
        self.destination_target
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount.get()
    }

    #[must_use]
    pub fn prevent_knockout(&self) -> bool {
        self.prevent_knockout
    }
}

impl EffectPayload for MoveDamageCounters {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        let source = reader.enum_value("sourceTarget")?;
        let destination = reader.enum_value("destinationTarget")?;
        let amount = reader.count("amount")?;
        let prevent_knockout = reader.flag("preventKnockout", true)?;
        MoveDamageCounters::new(source, destination, amount, prevent_knockout)
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("sourceTarget", self.source_target.as_str())
            .with("destinationTarget", self.destination_target.as_str())
            .with("amount", self.amount.get())
            .with("preventKnockout", self.prevent_knockout)
    }
}

/// Remove special conditions from a target. Empty list cures everything.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CureStatus {
    pub target: EffectTarget,
    pub conditions: Vec<SpecialCondition>,
}

impl EffectPayload for CureStatus {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            target: reader.enum_value("target")?,
            conditions: reader.enum_list("conditions")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        let raw = raw.with("target", self.target.as_str());
        if self.conditions.is_empty() {
            raw
        } else {
            let names: Vec<&str> = self.conditions.iter().map(|c| c.as_str()).collect();
            raw.with("conditions", names)
        }
    }
}

/// Discard cards from hand to search the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TradeCards {
    pub discard_amount: NonZeroU32,
    pub search_amount: NonZeroU32,
}

impl EffectPayload for TradeCards {
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            discard_amount: reader.positive("discardAmount")?,
            search_amount: reader.positive("searchAmount")?,
        })
    }

    fn write(&self, raw: RawEffect) -> RawEffect {
        raw.with("discardAmount", self.discard_amount.get())
            .with("searchAmount", self.search_amount.get())
    }
}
