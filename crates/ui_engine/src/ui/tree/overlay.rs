//! Deferred overlay channel
//!
//! Content that must appear above everything else (an expanded dropdown
//! list) is registered during the draw pass and run once after the whole
//! menu stack has been drawn. Registration takes `&self` so a widget can
//! register from inside its own draw call.

use std::sync::Mutex;

use crate::events::{self, HandlerResult};
use crate::ui::context::DrawCx;

type OverlayFn = Box<dyn FnOnce(&mut DrawCx<'_>) -> HandlerResult + Send>;

/// Queue of draw callbacks run after the main pass
#[derive(Default)]
pub struct OverlayQueue {
    pending: Mutex<Vec<OverlayFn>>,
}

impl OverlayQueue {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the next flush
    pub fn register(&self, overlay: impl FnOnce(&mut DrawCx<'_>) -> HandlerResult + Send + 'static) {
        self.lock().push(Box::new(overlay));
    }

    /// Number of callbacks waiting for the next flush
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing is pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run and discard every pending callback in registration order.
    ///
    /// The queue is swapped out before running, so callbacks registered
    /// during the flush wait for the next one. Failures are logged and do not
    /// stop the remaining callbacks.
    pub fn flush(&self, cx: &mut DrawCx<'_>) -> usize {
        let pending = std::mem::take(&mut *self.lock());
        let count = pending.len();
        for (index, overlay) in pending.into_iter().enumerate() {
            events::run_logged("OverlayQueue", &format!("overlay #{index}"), || overlay(cx));
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<OverlayFn>> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for OverlayQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayQueue")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::foundation::color::Color;
    use crate::foundation::math::Rect;
    use crate::output::VirtualCanvas;
    use crate::text::{FontLibrary, FontdueRenderer, GlyphCache};
    use crate::ui::rendering::CommandList;

    fn flush_into(queue: &OverlayQueue, batch: &mut CommandList) -> usize {
        let glyphs = GlyphCache::new(FontdueRenderer::new(FontLibrary::system_only()));
        let render = RenderConfig::new();
        let mut cx = DrawCx {
            batch,
            glyphs: &glyphs,
            overlays: queue,
            canvas: VirtualCanvas::new(100, 100, 100),
            render: &render,
        };
        queue.flush(&mut cx)
    }

    #[test]
    fn test_flush_runs_in_registration_order() {
        let queue = OverlayQueue::new();
        for i in 1..=3 {
            queue.register(move |cx| {
                cx.fill(Rect::new(0, 0, i, i), Color::WHITE);
                Ok(())
            });
        }

        let mut batch = CommandList::new();
        assert_eq!(flush_into(&queue, &mut batch), 3);
        let widths: Vec<i32> = batch.fills().map(|(r, _)| r.width).collect();
        assert_eq!(widths, [1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_panicking_overlay_is_contained() {
        let queue = OverlayQueue::new();
        queue.register(|_| panic!("overlay bug"));
        queue.register(|cx| {
            cx.fill(Rect::new(0, 0, 5, 5), Color::WHITE);
            Ok(())
        });

        let mut batch = CommandList::new();
        assert_eq!(flush_into(&queue, &mut batch), 2);
        assert_eq!(batch.fills().count(), 1);
        assert_eq!(flush_into(&queue, &mut batch), 0);
    }
}
