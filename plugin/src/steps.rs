use slipway_appservice::DeploymentSlot;

use crate::descriptor::DeploymentDescriptor;

/// Runs the deploy step: make sure the slot exists, then upload every
/// resolved artifact in order. Failures abort immediately; whatever the
/// remote side already applied is left as-is.
pub fn deploy(slot: &DeploymentSlot, descriptor: &DeploymentDescriptor) -> anyhow::Result<()> {
    if !slot.exists()? {
        info!(
            "Slot {} of {} does not exist yet, provisioning it",
            descriptor.slot_name, descriptor.app_name
        );
        let entity = slot
            .create()
            .runtime(descriptor.runtime.clone())
            .docker_configuration(descriptor.docker_configuration.clone())
            .commit()
            .inspect_err(|e| error!("Failed to provision slot: {}", e))?;
        info!("Provisioned slot {} in state {}", entity.name, entity.state);
    }

    if descriptor.artifacts.is_empty() {
        warn!("No artifacts configured, nothing to upload");
        return Ok(());
    }

    for artifact in &descriptor.artifacts {
        slot.deploy_as(artifact.deploy_type, &artifact.file)
            .inspect_err(|e| error!("Failed to deploy {:?}: {}", artifact.file, e))?;
    }
    info!(
        "Deployed {} artifact(s) to slot {}",
        descriptor.artifacts.len(),
        descriptor.slot_name
    );
    Ok(())
}
