// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot of the child surface reused while the view animates.

use smallvec::SmallVec;
use topoview_imaging::{
    Affine, DrawOp, ImagingBackend, ImagingBackendExt, PictureId, StateOp, record_picture,
};

use crate::surface::Surface;

/// Holds at most one recorded picture of the child.
///
/// The first animating frame paints the child live while recording it;
/// later animating frames replay the picture under the frame's transform.
/// The picture is destroyed on the first settled frame, so a static view is
/// always painted live.
#[derive(Debug, Default)]
pub(crate) struct SnapshotCache {
    picture: Option<PictureId>,
    /// Pictures dropped without a backend at hand, destroyed on the next
    /// paint.
    stale: SmallVec<[PictureId; 2]>,
}

impl SnapshotCache {
    /// Paints `child` under `transform`, from the snapshot when one exists.
    ///
    /// Returns `true` when the snapshot was replayed.
    pub(crate) fn paint<S: Surface + ?Sized>(
        &mut self,
        backend: &mut dyn ImagingBackend,
        transform: Affine,
        child: &mut S,
    ) -> bool {
        self.flush(backend);
        if let Some(picture) = self.picture {
            backend.state(StateOp::SetTransform(Affine::IDENTITY));
            backend.draw(DrawOp::DrawPicture { picture, transform });
            return true;
        }
        backend.state(StateOp::SetTransform(transform));
        let picture = record_picture(backend, |b| child.paint(b));
        #[cfg(feature = "tracing")]
        tracing::trace!(picture = picture.0, "recorded child snapshot");
        self.picture = Some(picture);
        false
    }

    /// Paints `child` live under `transform` and drops any snapshot.
    pub(crate) fn paint_live<S: Surface + ?Sized>(
        &mut self,
        backend: &mut dyn ImagingBackend,
        transform: Affine,
        child: &mut S,
    ) {
        self.release(backend);
        backend.with_transform(transform, Affine::IDENTITY, |b| child.paint(b));
    }

    /// Destroys the snapshot and anything left over from earlier children.
    pub(crate) fn release(&mut self, backend: &mut dyn ImagingBackend) {
        if let Some(picture) = self.picture.take() {
            #[cfg(feature = "tracing")]
            tracing::trace!(picture = picture.0, "released child snapshot");
            backend.destroy_picture(picture);
        }
        self.flush(backend);
    }

    /// Forgets the snapshot without a backend, e.g. when the child changes.
    pub(crate) fn invalidate(&mut self) {
        if let Some(picture) = self.picture.take() {
            self.stale.push(picture);
        }
    }

    /// Returns `true` while a snapshot or stale picture is held.
    pub(crate) fn is_holding(&self) -> bool {
        self.picture.is_some() || !self.stale.is_empty()
    }

    fn flush(&mut self, backend: &mut dyn ImagingBackend) {
        for picture in self.stale.drain(..) {
            backend.destroy_picture(picture);
        }
    }
}
