//! # Permission Engine
//!
//! The entry point for callers: one engine per region, holding the region
//! info, the world collaborators, the configuration handle and the rule
//! registry.
//!
//! Every check takes one configuration snapshot, logs the check if debug
//! logging is on, answers with the forced outcome if bypass is engaged, and
//! otherwise runs the registered rule.

use std::sync::Arc;
use uuid::Uuid;

use region_estate::RegionInfo;

use crate::actions::ActionRequest;
use crate::commands::{CommandOutcome, ConsoleCommand};
use crate::config::{ConfigHandle, EngineConfig};
use crate::context::PermissionContext;
use crate::error::CommandError;
use crate::gate;
use crate::masks::ObjectFlags;
use crate::registry::ActionPredicateRegistry;
use crate::world::World;

/// Permission engine for a single region.
#[derive(Debug)]
pub struct PermissionEngine {
    region: RegionInfo,
    world: World,
    config: ConfigHandle,
    registry: ActionPredicateRegistry,
}

impl PermissionEngine {
    /// Create an engine with the built-in rules.
    pub fn new(region: RegionInfo, world: World, config: EngineConfig) -> Self {
        Self {
            region,
            world,
            config: ConfigHandle::new(config),
            registry: ActionPredicateRegistry::new(),
        }
    }

    /// Builder-style helper that installs a rule registry.
    pub fn with_registry(mut self, registry: ActionPredicateRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Rule registry, for replacing rules before the engine is shared.
    pub fn registry_mut(&mut self) -> &mut ActionPredicateRegistry {
        &mut self.registry
    }

    /// Region this engine guards.
    pub fn region(&self) -> &RegionInfo {
        &self.region
    }

    /// The currently committed configuration snapshot.
    pub fn config(&self) -> Arc<EngineConfig> {
        self.config.load()
    }

    /// Decide whether `request` is permitted.
    pub fn check(&self, request: &ActionRequest) -> bool {
        let config = self.config.load();
        let ctx = PermissionContext::new(&config, &self.region, &self.world);
        let gate = ctx.gate();

        gate.log(request.kind().as_str());

        if let Some(forced) = gate.forced_outcome() {
            return match request {
                ActionRequest::MoveObject { actor, object_id } => ctx.bypass_move(*actor, *object_id, forced),
                _ => forced,
            };
        }

        self.registry.evaluate(&ctx, request)
    }

    /// Object flags `viewer` is told about for `object_id`.
    pub fn generate_client_flags(&self, viewer: Uuid, object_id: Uuid) -> ObjectFlags {
        let config = self.config.load();
        PermissionContext::new(&config, &self.region, &self.world).generate_client_flags(viewer, object_id)
    }

    /// Whether `user` is an administrator of this region.
    pub fn is_administrator(&self, user: Uuid) -> bool {
        let config = self.config.load();
        PermissionContext::new(&config, &self.region, &self.world).is_administrator(user)
    }

    /// Whether permissions propagate to handed-over copies.
    ///
    /// Never while bypass is engaged.
    pub fn propagate_permissions(&self) -> bool {
        let config = self.config.load();
        !config.bypass_enabled && config.propagate_enabled
    }

    /// Whether bypass is engaged.
    pub fn bypass_permissions(&self) -> bool {
        self.config.load().bypass_enabled
    }

    /// Engage or release bypass.
    pub fn set_bypass_permissions(&self, enabled: bool) {
        self.config.update(|c| c.with_bypass(enabled));
    }

    /// Parse and run a console line.
    pub fn run_command(&self, line: &str, console_scene: Option<Uuid>) -> Result<CommandOutcome, CommandError> {
        let command = ConsoleCommand::parse(line)?;
        Ok(self.handle_command(command, console_scene))
    }

    /// Run a console command.
    ///
    /// `console_scene` is the scene the console is currently addressing;
    /// `None` addresses every scene.
    pub fn handle_command(&self, command: ConsoleCommand, console_scene: Option<Uuid>) -> CommandOutcome {
        if console_scene.is_some_and(|scene| scene != self.region.region_id) {
            return CommandOutcome::Ignored;
        }

        let region = self.region.region_name.as_str();

        let applied = match command {
            ConsoleCommand::Bypass(enabled) => {
                self.config.update(|c| c.with_bypass(enabled));
                true
            }
            ConsoleCommand::Force(value) => self.config.try_update(|c| gate::force(c, value)).is_some(),
            ConsoleCommand::Debug(enabled) => {
                self.config.update(|c| c.with_debug_logging(enabled));
                true
            }
        };

        if applied {
            tracing::info!(
                region = region,
                command = command.name(),
                value = command.value(),
                "Permissions command applied"
            );
            CommandOutcome::Applied
        } else {
            tracing::warn!(
                region = region,
                command = command.name(),
                "Unable to force permissions while bypass is off"
            );
            CommandOutcome::Rejected(format!(
                "Permissions are not bypassed in {region}; enable bypass before running `{}`",
                command.name()
            ))
        }
    }
}
