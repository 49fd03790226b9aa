//! The move-phase seam.
//!
//! Real runs supply a mover wrapping the host mesh's particle tracking and
//! boundary conditions; [`FreeFlight`] is the trivial ballistic default.
//! Parcels a mover leaves outside the domain are removed as strays by the
//! post-move occupancy reconciliation.

use dsmc_cloud::ParticleStore;

/// Advances every parcel's position over one step.
pub trait Mover {
    fn move_parcels(&self, store: &mut ParticleStore, dt: f64);
}

/// Ballistic advection with no boundary interaction.
pub struct FreeFlight;

impl Mover for FreeFlight {
    fn move_parcels(&self, store: &mut ParticleStore, dt: f64) {
        for (_, parcel) in store.iter_mut() {
            parcel.position += parcel.velocity * dt;
        }
    }
}
