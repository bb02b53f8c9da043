use super::DesignerState;
use crate::canvas::{DrawKey, DrawMode, DrawOutcome, DrawPreview, Modifiers};
use crate::commands::LayoutCommand;
use crate::geometry::Point;
use crate::model::Area;
use venuekit_core::{parse_length_lenient, AreaKind, LayoutError};

impl DesignerState {
    pub fn areas(&self) -> &[Area] {
        &self.snapshot().areas
    }

    /// Appends an area. Returns its index.
    pub fn add_area(&mut self, area: Area) -> Result<usize, LayoutError> {
        let index = self.committed_snapshot(self.active).areas.len();
        self.dispatch(LayoutCommand::AddArea { area })?;
        Ok(index)
    }

    pub fn update_area(&mut self, index: usize, area: Area) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::UpdateArea { index, area })
    }

    /// Rescales one segment of an area outline. Non-positive lengths are
    /// ignored.
    pub fn set_segment_length(
        &mut self,
        index: usize,
        segment: usize,
        length: f64,
    ) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::SetSegmentLength {
            index,
            segment,
            length,
        })
    }

    pub fn delete_area(&mut self, index: usize) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::DeleteArea { index })
    }

    /// Selects a drawing tool for the active scope, or none.
    pub fn set_draw_mode(&mut self, mode: Option<DrawMode>) {
        self.scope_state_mut(self.active).drawing.set_mode(mode);
    }

    pub fn draw_mode(&self) -> Option<DrawMode> {
        self.scope_state(self.active).drawing.mode()
    }

    /// Overrides the kind of areas produced by the drawing tools.
    pub fn set_draw_area_kind(&mut self, kind: Option<AreaKind>) {
        self.scope_state_mut(self.active).drawing.set_area_kind(kind);
    }

    pub fn drawing_preview(&self) -> DrawPreview {
        self.scope_state(self.active).drawing.preview()
    }

    pub fn is_drawing(&self) -> bool {
        self.scope_state(self.active).drawing.is_drawing()
    }

    /// Pointer press at a screen position while a drawing tool is active.
    pub fn draw_pointer_down(
        &mut self,
        screen: Point,
        mods: Modifiers,
    ) -> Result<DrawOutcome, LayoutError> {
        let world = self.viewport.screen_to_world(&screen);
        let zoom = self.viewport.zoom();
        let state = self.scope_state_mut(self.active);
        state.drawing.set_scale(zoom);
        let outcome = state.drawing.pointer_down(world, mods, &state.snapshot.areas);
        self.apply_draw_outcome(outcome)
    }

    pub fn draw_pointer_move(
        &mut self,
        screen: Point,
        mods: Modifiers,
    ) -> Result<DrawOutcome, LayoutError> {
        let world = self.viewport.screen_to_world(&screen);
        let outcome = self
            .scope_state_mut(self.active)
            .drawing
            .pointer_move(world, mods);
        self.apply_draw_outcome(outcome)
    }

    pub fn draw_pointer_up(
        &mut self,
        screen: Point,
        mods: Modifiers,
    ) -> Result<DrawOutcome, LayoutError> {
        let world = self.viewport.screen_to_world(&screen);
        let outcome = self
            .scope_state_mut(self.active)
            .drawing
            .pointer_up(world, mods);
        self.apply_draw_outcome(outcome)
    }

    pub fn draw_double_click(&mut self, screen: Point) -> Result<DrawOutcome, LayoutError> {
        let world = self.viewport.screen_to_world(&screen);
        let outcome = self.scope_state_mut(self.active).drawing.double_click(world);
        self.apply_draw_outcome(outcome)
    }

    pub fn draw_key(&mut self, key: DrawKey) -> Result<DrawOutcome, LayoutError> {
        let outcome = self.scope_state_mut(self.active).drawing.key(key);
        self.apply_draw_outcome(outcome)
    }

    /// Answers the exact-length prompt, in world units.
    pub fn draw_submit_length(&mut self, length: f64) -> Result<DrawOutcome, LayoutError> {
        let outcome = self
            .scope_state_mut(self.active)
            .drawing
            .submit_length(length);
        self.apply_draw_outcome(outcome)
    }

    /// Answers the exact-length prompt with typed text, read in the
    /// configured units (metres or feet). Unreadable input is ignored.
    pub fn draw_submit_length_text(&mut self, input: &str) -> Result<DrawOutcome, LayoutError> {
        let length = parse_length_lenient(input, self.export_settings.units);
        self.draw_submit_length(length)
    }

    /// Commits finished areas and erasures to the layout.
    fn apply_draw_outcome(&mut self, outcome: DrawOutcome) -> Result<DrawOutcome, LayoutError> {
        match &outcome {
            DrawOutcome::Finalized(area) => {
                self.add_area(area.clone())?;
            }
            DrawOutcome::Erase(index) => {
                self.delete_area(*index)?;
            }
            _ => {}
        }
        Ok(outcome)
    }
}
