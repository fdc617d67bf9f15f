// Effect rendering - particles and the pointer overlay
//
// Particles live in fractional cell coordinates; drawing rounds them onto
// the grid and skips anything outside the area. Fade is approximated with
// the DIM modifier since cells have no alpha.

use crate::engine::particles::ParticleField;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};
use std::time::Instant;

/// Draw every particle of `field` that currently falls inside `area`.
pub fn render_field(f: &mut Frame, area: Rect, field: &ParticleField, now: Instant, color: Color) {
    let buf = f.buffer_mut();
    for particle in field.iter() {
        let (x, y) = field.position(particle, now);
        let (x, y) = (x.round() as i32, y.round() as i32);
        if x < area.left() as i32
            || x >= area.right() as i32
            || y < area.top() as i32
            || y >= area.bottom() as i32
        {
            continue;
        }
        let mut style = Style::default().fg(color);
        if field.fade(particle, now) < 0.35 {
            style = style.add_modifier(Modifier::DIM);
        }
        if particle.size >= 2.0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        // Tumbling particles read dimmer edge-on.
        let angle = particle.angle(now).rem_euclid(360.0);
        if particle.spin != 0.0 && (90.0..270.0).contains(&angle) {
            style = style.add_modifier(Modifier::DIM);
        }
        if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
            cell.set_char(particle.glyph);
            cell.set_style(style);
        }
    }
}

/// The custom heart cursor, drawn above everything at the pointer cell.
pub fn render_pointer(f: &mut Frame, area: Rect, pointer: Option<(u16, u16)>, theme: &Theme) {
    let Some((column, row)) = pointer else {
        return;
    };
    if column < area.left() || column >= area.right() || row < area.top() || row >= area.bottom() {
        return;
    }
    if let Some(cell) = f.buffer_mut().cell_mut((column, row)) {
        cell.set_char('❤');
        cell.set_style(Style::default().fg(theme.heart).add_modifier(Modifier::BOLD));
    }
}
