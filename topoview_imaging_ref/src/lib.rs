// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topoview Imaging Reference Backend.
//!
//! [`RefBackend`] implements [`ImagingBackend`] without rasterizing
//! anything. It logs every operation together with the imaging state it ran
//! under, which is what tests of the zoom engine and the diagram canvas
//! assert on: "the indicator was filled under the identity transform", "the
//! second frame drew a picture instead of the diagram", "the core label was
//! clipped to its box".
//!
//! Pictures live in slots that are reused after they are destroyed, so a
//! long animation that records and drops one snapshot per transition keeps
//! a bounded number of slots. [`RefBackend::flattened_draws`] expands picture
//! draws back into the operations they stand for.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use topoview_imaging::{
    Affine, Brush, DrawOp, ImagingBackend, ImagingOp, PictureDesc, PictureId, RecordedOps,
    ResourceBackend, StateOp, StrokeStyle, TextRun,
};

/// Imaging state in effect when an operation ran.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Number of clips pushed and not yet popped.
    pub clip_depth: u32,
    /// Current brush, once one is set.
    pub brush: Option<Brush>,
    /// Current stroke, once one is set.
    pub stroke: Option<StrokeStyle>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clip_depth: 0,
            brush: None,
            stroke: None,
        }
    }
}

/// One logged operation.
#[derive(Clone, Debug)]
pub enum Event {
    /// A state change and the state after it.
    State {
        /// The operation.
        op: StateOp,
        /// State after applying `op`.
        state: StateSnapshot,
    },
    /// A draw and the state it was drawn with.
    Draw {
        /// The operation.
        op: DrawOp,
        /// State at the time of drawing.
        state: StateSnapshot,
    },
}

impl Event {
    /// The state attached to this event.
    pub fn state(&self) -> &StateSnapshot {
        match self {
            Self::State { state, .. } | Self::Draw { state, .. } => state,
        }
    }
}

/// Recording, non-rasterizing imaging backend.
#[derive(Default, Debug)]
pub struct RefBackend {
    pictures: Vec<Option<PictureDesc>>,
    free_slots: Vec<u32>,
    events: Vec<Event>,
    ops: Vec<ImagingOp>,
    recording_start: Option<(usize, Affine)>,
    state: StateSnapshot,
}

impl RefBackend {
    /// Every operation applied since the last [`clear_events`](Self::clear_events).
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The same operations as [`events`](Self::events), without state.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Draw operations, in order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, .. } => Some(op),
            Event::State { .. } => None,
        })
    }

    /// Text runs drawn directly, in order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.draws().filter_map(|op| match op {
            DrawOp::DrawText(run) => Some(run),
            _ => None,
        })
    }

    /// Draw operations with picture draws replaced by the picture's own
    /// draws, each paired with the transform it ends up under.
    ///
    /// Pictures that no longer exist expand to nothing.
    pub fn flattened_draws(&self) -> Vec<(Affine, DrawOp)> {
        let mut out = Vec::new();
        for event in &self.events {
            if let Event::Draw { op, state } = event {
                self.flatten_into(op, state.transform, &mut out);
            }
        }
        out
    }

    fn flatten_into(&self, op: &DrawOp, transform: Affine, out: &mut Vec<(Affine, DrawOp)>) {
        let DrawOp::DrawPicture {
            picture,
            transform: placement,
        } = op
        else {
            out.push((transform, op.clone()));
            return;
        };
        let Some(desc) = self.picture(*picture) else {
            return;
        };
        let outer = transform * *placement;
        let mut inner = Affine::IDENTITY;
        for recorded in desc.recording.ops.iter() {
            match recorded {
                ImagingOp::State(StateOp::SetTransform(t)) => inner = *t,
                ImagingOp::State(_) => {}
                ImagingOp::Draw(draw) => self.flatten_into(draw, outer * inner, out),
            }
        }
    }

    /// The picture `id`, if it has not been destroyed.
    pub fn picture(&self, id: PictureId) -> Option<&PictureDesc> {
        self.pictures.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Number of pictures not yet destroyed.
    pub fn live_pictures(&self) -> usize {
        self.pictures.iter().filter(|slot| slot.is_some()).count()
    }

    /// State that the next operation would run under.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Forgets the logged operations. Pictures and the current state stay.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
        self.recording_start = None;
    }
}

impl ResourceBackend for RefBackend {
    fn create_picture(&mut self, desc: PictureDesc) -> PictureId {
        if let Some(slot) = self.free_slots.pop() {
            self.pictures[slot as usize] = Some(desc);
            return PictureId(slot);
        }
        let slot = u32::try_from(self.pictures.len()).unwrap_or(u32::MAX);
        self.pictures.push(Some(desc));
        PictureId(slot)
    }

    fn destroy_picture(&mut self, id: PictureId) {
        if let Some(slot) = self.pictures.get_mut(id.0 as usize)
            && slot.take().is_some()
        {
            self.free_slots.push(id.0);
        }
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        let state = &mut self.state;
        match &op {
            StateOp::SetTransform(t) => state.transform = *t,
            StateOp::SetBrush(brush) => state.brush = Some(brush.clone()),
            StateOp::SetStroke(stroke) => state.stroke = Some(stroke.clone()),
            StateOp::PushClip(_) => state.clip_depth += 1,
            StateOp::PopClip => state.clip_depth = state.clip_depth.saturating_sub(1),
        }
        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }

    fn begin_record(&mut self) {
        self.recording_start = Some((self.ops.len(), self.state.transform));
    }

    fn end_record(&mut self) -> RecordedOps {
        let (start, ctm) = self
            .recording_start
            .take()
            .unwrap_or((self.ops.len(), self.state.transform));
        RecordedOps {
            ops: Arc::from(&self.ops[start..]),
            original_ctm: Some(ctm),
        }
    }
}
