//! Proximity styling and culling.
//!
//! Each item's look is a function of its distance from the focal point (the
//! viewport centre) once the pan offset is applied. [`item_style`] computes
//! that for one item with no reference to any other, so a frame can be
//! evaluated item by item on any thread. [`ProximityEngine`] adds the only
//! piece of per-item state: a scale spring that smooths size changes.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::bounds::Rect;
use crate::config::ProximityConfig;
use crate::grid::{GridItem, Honeycomb, ItemId};
use crate::spring::Spring;

/// Screen area the grid is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Focal point in screen coordinates.
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Grid-space area on screen when the pan offset is `pan`.
    pub fn visible_rect(&self, pan: Vec2) -> Rect {
        Rect::centered(-pan, self.size())
    }
}

/// Visual state of one item for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub id: ItemId,
    /// Item centre relative to the focal point
    pub offset: Vec2,
    /// Item centre in screen coordinates
    pub center: Vec2,
    /// Top-left corner of the item box in screen coordinates
    pub translate: Vec2,
    pub distance: f32,
    pub scale: f32,
    pub opacity: f32,
    pub z_index: i32,
    pub visible: bool,
    pub very_close: bool,
}

/// Style of an item at `position` under pan offset `pan`.
pub fn item_style(
    id: ItemId,
    position: Vec2,
    pan: Vec2,
    viewport: &Viewport,
    config: &ProximityConfig,
) -> ItemStyle {
    let offset = position + pan;
    let distance = offset.length();
    let center = offset + viewport.center();
    let margin = config.item_dim;

    let visible = center.x >= -margin
        && center.x <= viewport.width + margin
        && center.y >= -margin
        && center.y <= viewport.height + margin;

    ItemStyle {
        id,
        offset,
        center,
        translate: center - Vec2::splat(config.item_dim * 0.5),
        distance,
        scale: config.scale_curve.sample(distance),
        opacity: config.opacity_curve.sample(distance),
        z_index: (config.z_base - distance).round() as i32,
        visible,
        very_close: distance < config.very_close_distance,
    }
}

/// Unsmoothed styles for every item, in collection order.
pub fn styles<'a, T>(
    grid: &'a Honeycomb<T>,
    pan: Vec2,
    viewport: &'a Viewport,
    config: &'a ProximityConfig,
) -> impl Iterator<Item = ItemStyle> + 'a {
    grid.iter()
        .map(move |item| item_style(item.id(), item.position(), pan, viewport, config))
}

/// Per-frame style pass with smoothed per-item scale.
#[derive(Debug, Clone, Default)]
pub struct ProximityEngine {
    config: ProximityConfig,
    scales: HashMap<ItemId, Spring<f32>>,
    frame: Vec<ItemStyle>,
}

impl ProximityEngine {
    pub fn new(config: ProximityConfig) -> Self {
        Self {
            config,
            scales: HashMap::new(),
            frame: Vec::new(),
        }
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Recompute the render set.
    ///
    /// Culled items are left out when culling is on. The result is ordered
    /// back to front by z-index, and each scale is multiplied by
    /// `canvas_scale`.
    pub fn update<T>(
        &mut self,
        grid: &Honeycomb<T>,
        pan: Vec2,
        viewport: &Viewport,
        canvas_scale: f32,
        dt: f32,
    ) -> &[ItemStyle] {
        self.frame.clear();

        for item in grid {
            let mut style = item_style(item.id(), item.position(), pan, viewport, &self.config);
            if self.config.cull && !style.visible {
                continue;
            }

            let spring = self
                .scales
                .entry(item.id())
                .or_insert_with(|| Spring::new(style.scale));
            if spring.target() != style.scale {
                spring.animate_to(style.scale, self.config.scale_spring, None);
            }
            spring.tick(dt);

            style.scale = spring.value() * canvas_scale;
            self.frame.push(style);
        }

        self.frame.sort_by_key(|style| style.z_index);
        &self.frame
    }

    /// Render set from the last [`ProximityEngine::update`].
    pub fn frame(&self) -> &[ItemStyle] {
        &self.frame
    }

    /// Style of one item in the last frame, if it was rendered.
    pub fn style_of(&self, id: ItemId) -> Option<&ItemStyle> {
        self.frame.iter().find(|style| style.id == id)
    }

    /// Drop animation state for an item that left the grid.
    pub fn forget(&mut self, id: ItemId) {
        self.scales.remove(&id);
        self.frame.retain(|style| style.id != id);
    }

    /// Drop animation state for every item no longer on the grid.
    pub fn prune<T>(&mut self, grid: &Honeycomb<T>) {
        self.scales.retain(|id, _| grid.contains(*id));
        self.frame.retain(|style| grid.contains(style.id));
    }

    pub fn clear(&mut self) {
        self.scales.clear();
        self.frame.clear();
    }

    /// Number of items with live animation state.
    pub fn tracked(&self) -> usize {
        self.scales.len()
    }
}

/// Pair each rendered style with its item.
pub fn render_pairs<'a, T>(
    grid: &'a Honeycomb<T>,
    frame: &'a [ItemStyle],
) -> impl Iterator<Item = (&'a GridItem<T>, &'a ItemStyle)> + 'a {
    frame
        .iter()
        .filter_map(move |style| grid.get(style.id).map(|item| (item, style)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeycomb_topology::HexLayout;

    const SCREEN: Viewport = Viewport::new(400.0, 800.0);

    fn grid(n: u64) -> Honeycomb<()> {
        Honeycomb::with_items(HexLayout::default(), (0..n).map(|i| (ItemId(i), ()))).unwrap()
    }

    #[test]
    fn centred_item_is_full_size_and_on_top() {
        let config = ProximityConfig::default();
        let style = item_style(ItemId(0), Vec2::ZERO, Vec2::ZERO, &SCREEN, &config);

        assert_eq!(style.distance, 0.0);
        assert_eq!(style.scale, 1.8);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.z_index, 1000);
        assert!(style.visible);
        assert!(style.very_close);
        assert_eq!(style.center, Vec2::new(200.0, 400.0));
        assert_eq!(style.translate, Vec2::new(130.0, 330.0));
    }

    #[test]
    fn pan_moves_focal_distance() {
        let config = ProximityConfig::default();
        let position = Vec2::new(300.0, 400.0);

        let far = item_style(ItemId(1), position, Vec2::ZERO, &SCREEN, &config);
        assert_eq!(far.distance, 500.0);
        assert_eq!(far.scale, 0.4);
        assert!((far.opacity - 0.05).abs() < 1e-6);
        assert_eq!(far.z_index, 500);
        assert!(!far.very_close);

        let centred = item_style(ItemId(1), position, -position, &SCREEN, &config);
        assert_eq!(centred.distance, 0.0);
        assert_eq!(centred.scale, 1.8);
    }

    #[test]
    fn scale_curve_midpoint() {
        let config = ProximityConfig::default();
        let style = item_style(ItemId(0), Vec2::new(275.0, 0.0), Vec2::ZERO, &SCREEN, &config);
        assert!(style.scale > 0.4 && style.scale < 1.0);
    }

    #[test]
    fn culling_margin_is_item_dim() {
        let config = ProximityConfig::default();
        // Screen centre x = 200; 200 + 140 off the right edge is 740 from centre.
        let edge = item_style(ItemId(0), Vec2::new(340.0, 0.0), Vec2::ZERO, &SCREEN, &config);
        assert!(edge.visible);

        let past = item_style(ItemId(0), Vec2::new(341.0, 0.0), Vec2::ZERO, &SCREEN, &config);
        assert!(!past.visible);

        let above = item_style(ItemId(0), Vec2::new(0.0, -541.0), Vec2::ZERO, &SCREEN, &config);
        assert!(!above.visible);
    }

    #[test]
    fn update_culls_and_orders_back_to_front() {
        let grid = grid(400);
        let mut engine = ProximityEngine::new(ProximityConfig::default());

        let frame = engine.update(&grid, Vec2::ZERO, &SCREEN, 1.0, 1.0 / 60.0);
        assert!(!frame.is_empty());
        assert!(frame.len() < grid.len());
        assert!(frame.iter().all(|s| s.visible));
        assert!(frame.windows(2).all(|w| w[0].z_index <= w[1].z_index));
        assert_eq!(frame.last().unwrap().id, ItemId(0));
    }

    #[test]
    fn culling_can_be_disabled() {
        let grid = grid(400);
        let config = ProximityConfig {
            cull: false,
            ..ProximityConfig::default()
        };
        let mut engine = ProximityEngine::new(config);
        assert_eq!(engine.update(&grid, Vec2::ZERO, &SCREEN, 1.0, 0.016).len(), 400);
    }

    #[test]
    fn scale_is_smoothed_toward_curve() {
        let grid = grid(1);
        let mut engine = ProximityEngine::new(ProximityConfig::default());
        engine.update(&grid, Vec2::ZERO, &SCREEN, 1.0, 0.016);
        assert_eq!(engine.style_of(ItemId(0)).unwrap().scale, 1.8);

        // Jump the pan so the curve wants 1.0; the spring lags behind.
        let pan = Vec2::new(100.0, 0.0);
        engine.update(&grid, pan, &SCREEN, 1.0, 0.016);
        let scale = engine.style_of(ItemId(0)).unwrap().scale;
        assert!(scale < 1.8 && scale > 1.0, "scale {scale}");

        for _ in 0..600 {
            engine.update(&grid, pan, &SCREEN, 1.0, 0.016);
        }
        assert_eq!(engine.style_of(ItemId(0)).unwrap().scale, 1.0);
    }

    #[test]
    fn canvas_scale_multiplies_item_scale() {
        let grid = grid(1);
        let mut engine = ProximityEngine::new(ProximityConfig::default());
        let frame = engine.update(&grid, Vec2::ZERO, &SCREEN, 0.5, 0.016);
        assert_eq!(frame[0].scale, 0.9);
    }

    #[test]
    fn prune_drops_state_for_removed_items() {
        let mut grid = grid(7);
        let mut engine = ProximityEngine::new(ProximityConfig::default());
        engine.update(&grid, Vec2::ZERO, &SCREEN, 1.0, 0.016);
        assert_eq!(engine.tracked(), 7);

        grid.remove(ItemId(3));
        engine.prune(&grid);
        assert_eq!(engine.tracked(), 6);
        assert!(engine.style_of(ItemId(3)).is_none());
    }

    #[test]
    fn unsmoothed_styles_match_per_item_function() {
        let grid = grid(19);
        let config = ProximityConfig::default();
        let pan = Vec2::new(-40.0, 25.0);

        for (style, item) in styles(&grid, pan, &SCREEN, &config).zip(grid.iter()) {
            assert_eq!(style, item_style(item.id(), item.position(), pan, &SCREEN, &config));
        }
    }

    #[test]
    fn visible_rect_follows_pan() {
        let rect = SCREEN.visible_rect(Vec2::new(-100.0, 50.0));
        assert_eq!(rect.min, Vec2::new(-100.0, -450.0));
        assert_eq!(rect.max, Vec2::new(300.0, 350.0));
    }
}
