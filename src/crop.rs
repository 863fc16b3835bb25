//! Crop geometry: image-space offsets ↔ display-space positions.
//!
//! A pending crop is four non-negative offsets in *image* pixels, one per
//! edge, saying how much to cut from that side at save time. Keeping them in
//! image space means a window resize only changes the [`CropGeometry`], never
//! the stored crop, so nothing drifts as the display scale changes.
//!
//! ## Display mapping
//!
//! The image is fitted into the viewport with a uniform scale
//! `min(vw / iw, vh / ih, 1.0)` (never upscaled) and centred. An offset maps
//! to display space as `origin + round(offset * scale)`, measured inward from
//! its own edge.
//!
//! ## Dragging
//!
//! [`CropDrag`] is a three-event state machine (`down → move* → up`) that
//! knows nothing about any windowing system. A drag converts the pointer
//! delta back to image pixels (`delta / scale`, truncated toward zero),
//! applies it to the offset captured at `down`, and clamps to
//! `[0, extent - opposite - min_remaining]`. The opposite edge is never
//! touched, so the two handles on an axis cannot cross.

use crate::config::CropConfig;

/// One side of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Which way an edge handle moves when dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left/right handles: horizontal resize cursor.
    Horizontal,
    /// Top/bottom handles: vertical resize cursor.
    Vertical,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::Horizontal,
            Edge::Top | Edge::Bottom => Axis::Vertical,
        }
    }

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }
}

/// Width × height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Extent along the axis an edge moves on.
    pub fn extent(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// A pointer position on the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Pixels to remove from each edge of the working image at save time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CropOffsets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropOffsets {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn get(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Copy with one edge replaced.
    pub fn with(mut self, edge: Edge, value: u32) -> Self {
        match edge {
            Edge::Left => self.left = value,
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
        }
        self
    }

    /// Whether every cropped axis leaves at least `min_remaining` pixels of
    /// `image`. An axis with both offsets zero is left as it is and always
    /// fits, so a narrow scan can still be trimmed top and bottom.
    pub fn fits(&self, image: Size, min_remaining: u32) -> bool {
        let keeps = |a: u32, b: u32, extent: u32| {
            (a == 0 && b == 0)
                || u64::from(a) + u64::from(b) + u64::from(min_remaining) <= u64::from(extent)
        };
        keeps(self.left, self.right, image.width) && keeps(self.top, self.bottom, image.height)
    }

    /// Size left after cropping `image`. Assumes [`fits`](Self::fits).
    pub fn cropped_size(&self, image: Size) -> Size {
        Size {
            width: image.width.saturating_sub(self.left + self.right),
            height: image.height.saturating_sub(self.top + self.bottom),
        }
    }

    /// Offsets after the image is mirrored left↔right.
    pub fn mirrored(self) -> Self {
        Self::new(self.right, self.top, self.left, self.bottom)
    }

    /// Offsets after the image turns a quarter clockwise: the old bottom
    /// edge becomes the left edge.
    pub fn rotated_clockwise(self) -> Self {
        Self::new(self.bottom, self.left, self.top, self.right)
    }

    /// Offsets after the image turns a quarter counter-clockwise.
    pub fn rotated_counter_clockwise(self) -> Self {
        Self::new(self.top, self.right, self.bottom, self.left)
    }
}

/// Display-space position of each crop boundary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundaries {
    pub left_x: i32,
    pub top_y: i32,
    pub right_x: i32,
    pub bottom_y: i32,
}

/// How an image of a given size sits inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGeometry {
    image: Size,
    scale: f64,
    origin: Point,
    display: Size,
    edge_tolerance: i32,
    min_remaining: u32,
}

impl CropGeometry {
    /// Fit `image` into `viewport`. `None` when either has no area, since
    /// there is nothing to hit-test against.
    pub fn new(image: Size, viewport: Size, config: &CropConfig) -> Option<Self> {
        if image.width == 0 || image.height == 0 || viewport.width == 0 || viewport.height == 0 {
            return None;
        }
        let scale = (f64::from(viewport.width) / f64::from(image.width))
            .min(f64::from(viewport.height) / f64::from(image.height))
            .min(1.0);
        let display = Size {
            width: (f64::from(image.width) * scale) as u32,
            height: (f64::from(image.height) * scale) as u32,
        };
        let origin = Point {
            x: ((viewport.width - display.width) / 2) as i32,
            y: ((viewport.height - display.height) / 2) as i32,
        };
        Some(Self {
            image,
            scale,
            origin,
            display,
            edge_tolerance: config.edge_tolerance as i32,
            min_remaining: config.min_remaining,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Top-left corner of the displayed image.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Size of the displayed image.
    pub fn display_size(&self) -> Size {
        self.display
    }

    pub fn image_size(&self) -> Size {
        self.image
    }

    fn scaled(&self, offset: u32) -> i32 {
        (f64::from(offset) * self.scale).round() as i32
    }

    /// Display position of the boundary line for `edge`.
    pub fn to_display(&self, edge: Edge, offsets: &CropOffsets) -> i32 {
        let offset = self.scaled(offsets.get(edge));
        match edge {
            Edge::Left => self.origin.x + offset,
            Edge::Top => self.origin.y + offset,
            Edge::Right => self.origin.x + self.display.width as i32 - offset,
            Edge::Bottom => self.origin.y + self.display.height as i32 - offset,
        }
    }

    pub fn boundaries(&self, offsets: &CropOffsets) -> Boundaries {
        Boundaries {
            left_x: self.to_display(Edge::Left, offsets),
            top_y: self.to_display(Edge::Top, offsets),
            right_x: self.to_display(Edge::Right, offsets),
            bottom_y: self.to_display(Edge::Bottom, offsets),
        }
    }

    /// The edge whose boundary is within tolerance of `pointer`, if any.
    ///
    /// Left/right need the pointer vertically within the displayed image;
    /// top/bottom need it horizontally within. Ties go left, right, top,
    /// bottom.
    pub fn hit_test(&self, offsets: &CropOffsets, pointer: Point) -> Option<Edge> {
        let b = self.boundaries(offsets);
        let img_left = self.origin.x;
        let img_top = self.origin.y;
        let img_right = img_left + self.display.width as i32;
        let img_bottom = img_top + self.display.height as i32;
        let near = |a: i32, b: i32| (a - b).abs() < self.edge_tolerance;

        if (img_top..=img_bottom).contains(&pointer.y) {
            if near(pointer.x, b.left_x) {
                return Some(Edge::Left);
            }
            if near(pointer.x, b.right_x) {
                return Some(Edge::Right);
            }
        }
        if (img_left..=img_right).contains(&pointer.x) {
            if near(pointer.y, b.top_y) {
                return Some(Edge::Top);
            }
            if near(pointer.y, b.bottom_y) {
                return Some(Edge::Bottom);
            }
        }
        None
    }

    /// New offset for `edge` after the pointer moved `delta` display pixels
    /// along the edge's axis since the drag started at `start_offset`.
    ///
    /// Positive deltas move right/down: that grows left/top crops and
    /// shrinks right/bottom ones.
    pub fn apply_drag(
        &self,
        edge: Edge,
        delta: i32,
        start_offset: u32,
        offsets: &CropOffsets,
    ) -> u32 {
        let delta_image = (f64::from(delta) / self.scale) as i64;
        let proposed = match edge {
            Edge::Left | Edge::Top => i64::from(start_offset) + delta_image,
            Edge::Right | Edge::Bottom => i64::from(start_offset) - delta_image,
        };
        let extent = i64::from(self.image.extent(edge.axis()));
        let max = extent - i64::from(offsets.get(edge.opposite())) - i64::from(self.min_remaining);
        proposed.min(max).max(0) as u32
    }
}

/// Pointer-drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        edge: Edge,
        /// Pointer coordinate along the edge's axis at `down`.
        anchor: i32,
        /// The edge's offset at `down`.
        start_offset: u32,
    },
}

/// `idle → dragging(edge) → idle`, driven by discrete pointer events.
#[derive(Debug, Clone, Default)]
pub struct CropDrag {
    state: DragState,
}

impl CropDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging the edge under the pointer. Returns the grabbed edge;
    /// a press away from every edge leaves the state idle.
    pub fn pointer_down(
        &mut self,
        geometry: &CropGeometry,
        offsets: &CropOffsets,
        pointer: Point,
    ) -> Option<Edge> {
        let edge = geometry.hit_test(offsets, pointer)?;
        self.state = DragState::Dragging {
            edge,
            anchor: pointer.along(edge.axis()),
            start_offset: offsets.get(edge),
        };
        Some(edge)
    }

    /// Offsets with the dragged edge moved to follow the pointer, or `None`
    /// when idle.
    pub fn pointer_move(
        &self,
        geometry: &CropGeometry,
        offsets: &CropOffsets,
        pointer: Point,
    ) -> Option<CropOffsets> {
        let DragState::Dragging {
            edge,
            anchor,
            start_offset,
        } = self.state
        else {
            return None;
        };
        let delta = pointer.along(edge.axis()) - anchor;
        let value = geometry.apply_drag(edge, delta, start_offset, offsets);
        Some(offsets.with(edge, value))
    }

    /// End the drag. Returns the edge that was being dragged.
    pub fn pointer_up(&mut self) -> Option<Edge> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { edge, .. } => Some(edge),
            DragState::Idle => None,
        }
    }
}
