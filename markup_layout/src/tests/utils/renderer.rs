// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Rect;

use crate::{Decoration, RenderTarget, TextRun};

/// Something a [`Recorder`] was asked to draw.
#[derive(Clone, Debug)]
pub(crate) enum Event {
    Run(TextRun),
    Decoration(Decoration, Rect),
}

/// A render target that keeps everything it is given, in order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) events: Vec<Event>,
}

impl Recorder {
    pub(crate) fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.events.iter().filter_map(|event| match event {
            Event::Run(run) => Some(run),
            Event::Decoration(..) => None,
        })
    }

    pub(crate) fn run_texts(&self) -> Vec<&str> {
        self.runs().map(|run| run.text.as_str()).collect()
    }
}

impl RenderTarget for Recorder {
    fn draw_run(&mut self, run: &TextRun) {
        self.events.push(Event::Run(run.clone()));
    }

    fn fill_decoration(&mut self, decoration: Decoration, area: Rect, _run: &TextRun) {
        self.events.push(Event::Decoration(decoration, area));
    }
}
