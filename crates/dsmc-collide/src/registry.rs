//! String-keyed model factories, resolved once at configuration time.

use std::collections::HashMap;
use std::sync::Arc;

use dsmc_species::SpeciesTable;

use crate::larsen_borgnakke::{LarsenBorgnakkeVariableHardSphere, RelaxationNumbers};
use crate::vhs::VariableHardSphere;
use crate::{
    BinaryCollisionModel, CollideError, CollideResult, NoReaction, PartnerSelection,
    ReactionModel, UniformPartnerSelection,
};

/// Shared construction inputs handed to every factory.
pub struct ModelContext {
    pub species:    Arc<SpeciesTable>,
    pub relaxation: RelaxationNumbers,
}

type CollisionFactory = Box<dyn Fn(&ModelContext) -> Box<dyn BinaryCollisionModel> + Send + Sync>;
type PartnerFactory = Box<dyn Fn(&ModelContext) -> Box<dyn PartnerSelection> + Send + Sync>;
type ReactionFactory = Box<dyn Fn(&ModelContext) -> Box<dyn ReactionModel> + Send + Sync>;

/// Registry mapping configuration names to model constructors.
///
/// Resolution failures are fatal configuration errors; they happen before
/// the first step, never mid-run.
pub struct ModelRegistry {
    collision: HashMap<String, CollisionFactory>,
    partner:   HashMap<String, PartnerFactory>,
    reaction:  HashMap<String, ReactionFactory>,
}

impl ModelRegistry {
    /// An empty registry with no models.
    pub fn empty() -> Self {
        Self { collision: HashMap::new(), partner: HashMap::new(), reaction: HashMap::new() }
    }

    /// The registry with every built-in model registered under its
    /// configuration name.
    pub fn with_builtin_models() -> Self {
        let mut registry = Self::empty();
        registry.register_collision("variableHardSphere", |ctx| {
            Box::new(VariableHardSphere::new(Arc::clone(&ctx.species)))
        });
        registry.register_collision("larsenBorgnakkeVariableHardSphere", |ctx| {
            Box::new(LarsenBorgnakkeVariableHardSphere::new(
                Arc::clone(&ctx.species),
                ctx.relaxation,
            ))
        });
        registry.register_partner("uniform", |_| Box::new(UniformPartnerSelection));
        registry.register_reaction("none", |_| Box::new(NoReaction));
        registry
    }

    pub fn register_collision<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ModelContext) -> Box<dyn BinaryCollisionModel> + Send + Sync + 'static,
    {
        self.collision.insert(name.to_owned(), Box::new(factory));
    }

    pub fn register_partner<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ModelContext) -> Box<dyn PartnerSelection> + Send + Sync + 'static,
    {
        self.partner.insert(name.to_owned(), Box::new(factory));
    }

    pub fn register_reaction<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ModelContext) -> Box<dyn ReactionModel> + Send + Sync + 'static,
    {
        self.reaction.insert(name.to_owned(), Box::new(factory));
    }

    pub fn collision(
        &self,
        name: &str,
        ctx: &ModelContext,
    ) -> CollideResult<Box<dyn BinaryCollisionModel>> {
        self.collision
            .get(name)
            .map(|f| f(ctx))
            .ok_or_else(|| CollideError::UnknownModel { kind: "collision", name: name.to_owned() })
    }

    pub fn partner(&self, name: &str, ctx: &ModelContext) -> CollideResult<Box<dyn PartnerSelection>> {
        self.partner
            .get(name)
            .map(|f| f(ctx))
            .ok_or_else(|| CollideError::UnknownModel { kind: "partner", name: name.to_owned() })
    }

    pub fn reaction(&self, name: &str, ctx: &ModelContext) -> CollideResult<Box<dyn ReactionModel>> {
        self.reaction
            .get(name)
            .map(|f| f(ctx))
            .ok_or_else(|| CollideError::UnknownModel { kind: "reaction", name: name.to_owned() })
    }
}
