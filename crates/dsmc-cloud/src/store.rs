//! Slot-stable parcel storage.
//!
//! # Why a slab and not a plain `Vec`
//!
//! Parcels are created (boundary injection, reaction products) and destroyed
//! (boundary removal, recombination) continuously, while the occupancy index
//! holds their IDs.  `swap_remove` on a plain `Vec` would silently re-key a
//! live parcel and corrupt every occupancy list that mentions it.  A slab
//! with a free-list gives O(1) insert/remove and IDs that stay valid from
//! creation until removal, which is exactly the identity contract the
//! occupancy invariant needs.

use dsmc_core::ParcelId;

use crate::Parcel;

/// Owner of all parcels on this partition.
///
/// `ParcelId` is the slot index; removed slots are recycled in LIFO order.
#[derive(Default)]
pub struct ParticleStore {
    slots: Vec<Option<Parcel>>,
    free:  Vec<ParcelId>,
    live:  usize,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate capacity for `n` parcels.
    pub fn with_capacity(n: usize) -> Self {
        Self { slots: Vec::with_capacity(n), free: Vec::new(), live: 0 }
    }

    /// Number of live parcels.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Insert a parcel, reusing a free slot when one exists.
    pub fn insert(&mut self, parcel: Parcel) -> ParcelId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(parcel);
                id
            }
            None => {
                let id = ParcelId(self.slots.len() as u32);
                self.slots.push(Some(parcel));
                id
            }
        }
    }

    /// Remove a parcel, returning it if the slot was live.
    ///
    /// The caller is responsible for removing the ID from the occupancy index
    /// first (or rebuilding afterwards); see
    /// [`CellIndex::remove`][crate::CellIndex::remove] which does both.
    pub fn remove(&mut self, id: ParcelId) -> Option<Parcel> {
        let parcel = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id);
        self.live -= 1;
        Some(parcel)
    }

    #[inline]
    pub fn get(&self, id: ParcelId) -> Option<&Parcel> {
        self.slots.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: ParcelId) -> Option<&mut Parcel> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Disjoint mutable access to two distinct parcels — the collision pair.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either slot is empty; both indicate a broken
    /// occupancy list (the candidate bookkeeping guarantees distinct live
    /// IDs within a trial).
    pub fn pair_mut(&mut self, a: ParcelId, b: ParcelId) -> (&mut Parcel, &mut Parcel) {
        assert_ne!(a, b, "collision pair must be two distinct parcels");
        let ptr = self.slots.as_mut_ptr();
        // SAFETY: a != b (asserted above) and both indices are in-bounds for
        // any ID this store handed out, so the two references alias distinct
        // elements of `self.slots`.
        unsafe {
            let pa = (*ptr.add(a.index())).as_mut().expect("parcel slot empty");
            let pb = (*ptr.add(b.index())).as_mut().expect("parcel slot empty");
            (pa, pb)
        }
    }

    /// Iterator over live parcels in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ParcelId, &Parcel)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (ParcelId(i as u32), p)))
    }

    /// Mutable iterator over live parcels in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParcelId, &mut Parcel)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|p| (ParcelId(i as u32), p)))
    }

    /// Slot array access for the parallel reconciliation scan.
    #[cfg(feature = "parallel")]
    pub(crate) fn slots(&self) -> &[Option<Parcel>] {
        &self.slots
    }

    /// Drain every parcel, leaving the store empty (used when migrating all
    /// parcels off this partition).
    pub fn drain(&mut self) -> Vec<Parcel> {
        let drained = self
            .slots
            .iter_mut()
            .filter_map(|slot| slot.take())
            .collect();
        self.free.clear();
        self.slots.clear();
        self.live = 0;
        drained
    }
}
