//! Fixed timestep simulation tick
//!
//! Drives the stroke cycle for one hole: drag-to-aim, shot execution,
//! hazard recovery, the putting mini-game and the hole-out countdown.

use glam::Vec2;

use super::club::{ClubKey, PUTTER};
use super::lie::LieKind;
use super::putt::{PuttOutcome, PuttState};
use super::state::{GameEvent, HoleResult, HoleState, PenaltyReason, StrokePhase};
use super::trajectory::{StepResult, Terrain, advance_ball, preview_roll, preview_shot};
use crate::consts::*;
use crate::scorecard::ScoreLabel;

/// A pointer event in course space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events since the last tick, oldest first
    pub pointer_events: Vec<PointerEvent>,
    /// Switch the active club
    pub select_club: Option<ClubKey>,
    /// Stop the putting gauge and strike
    pub lock_putt: bool,
    /// Leave the putting mini-game
    pub cancel_putt: bool,
    /// Go back into the putting mini-game from the green
    pub start_putt: bool,
    /// Start the hole over
    pub reset_hole: bool,
}

/// Advance the hole by one fixed timestep
pub fn tick(state: &mut HoleState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    if input.reset_hole {
        if state.ball.putt_mode {
            events.push(GameEvent::PuttMode { on: false });
        }
        state.restart();
        return events;
    }

    if state.is_complete() {
        return events;
    }

    if let Some(club) = input.select_club {
        select_club(state, club);
    }

    for event in &input.pointer_events {
        handle_pointer(state, *event, &mut events);
    }

    if input.start_putt
        && state.phase == StrokePhase::Aiming
        && state.ball.putt_mode
        && state.ball.speed() < INPUT_LOCK_SPEED
    {
        enter_putting(state);
    }

    match state.phase {
        StrokePhase::Executing => step_ball(state, dt, &mut events),
        StrokePhase::Settled => settle(state, &mut events),
        StrokePhase::Putting => step_putt(state, input, dt, &mut events),
        StrokePhase::HoleOut { remaining, label } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                log::info!(
                    "Hole complete: {} strokes on a par {}",
                    state.ball.strokes,
                    state.hole.par
                );
                events.push(GameEvent::Hole {
                    result: HoleResult::Out,
                    strokes: state.ball.strokes,
                    par: state.hole.par,
                });
                state.phase = StrokePhase::HoleComplete;
            } else {
                state.phase = StrokePhase::HoleOut { remaining, label };
            }
        }
        StrokePhase::Aiming | StrokePhase::Dragging { .. } | StrokePhase::HoleComplete => {}
    }

    track_safe_spot(state);
    events
}

fn select_club(state: &mut HoleState, club: ClubKey) {
    match state.phase {
        StrokePhase::Aiming => state.ball.club = club,
        StrokePhase::Dragging { .. } => {
            state.ball.club = club;
            refresh_preview(state);
        }
        _ => return,
    }
    log::debug!("Club: {}", club.spec().label);
}

fn handle_pointer(state: &mut HoleState, event: PointerEvent, events: &mut Vec<GameEvent>) {
    match (event, state.phase) {
        (PointerEvent::Down(p), StrokePhase::Aiming) => {
            if state.ball.speed() >= INPUT_LOCK_SPEED {
                return;
            }
            if p.distance(state.ball.pos) > DRAG_GRAB_RADIUS {
                return;
            }
            state.phase = StrokePhase::Dragging {
                start: p,
                current: p,
            };
            refresh_preview(state);
        }
        (PointerEvent::Move(p), StrokePhase::Dragging { start, .. }) => {
            state.phase = StrokePhase::Dragging { start, current: p };
            refresh_preview(state);
        }
        (PointerEvent::Up(p), StrokePhase::Dragging { start, .. }) => {
            release(state, start, p, events);
        }
        _ => {}
    }
}

/// Launch velocity for a slingshot drag, and whether it is a putter roll
fn shot_launch(state: &HoleState, drag: Vec2) -> (Vec2, bool) {
    let aim = drag.normalize_or_zero();
    if state.ball.putt_mode {
        let speed = (drag.length() * PUTTER_DRAG_SCALE).min(PUTTER_MAX_SPEED);
        (aim * speed, true)
    } else {
        (state.club_spec().shot_velocity(aim), false)
    }
}

fn refresh_preview(state: &mut HoleState) {
    let StrokePhase::Dragging { start, current } = state.phase else {
        state.preview = None;
        return;
    };
    let drag = start - current;
    if drag.length() < MIN_DRAG_DISTANCE {
        state.preview = None;
        return;
    }

    let (v0, putter) = shot_launch(state, drag);
    let terrain = state.terrain();
    let preview = if putter {
        preview_roll(state.ball.pos, v0, &PUTTER, &terrain, state.debug_preview)
    } else {
        preview_shot(
            state.ball.pos,
            v0,
            state.club_spec(),
            &terrain,
            state.debug_preview,
        )
    };
    log::debug!(
        "Preview: lands ({:.0}, {:.0}), finishes {:?}",
        preview.landing.x,
        preview.landing.y,
        preview.outcome
    );
    state.preview = Some(preview);
}

fn release(state: &mut HoleState, start: Vec2, at: Vec2, events: &mut Vec<GameEvent>) {
    state.preview = None;
    let drag = start - at;
    if drag.length() < MIN_DRAG_DISTANCE {
        log::debug!("Drag too short, shot cancelled");
        state.phase = StrokePhase::Aiming;
        return;
    }

    let (v0, putter) = shot_launch(state, drag);
    state.ball.vel = v0;
    state.putter_stroke = putter;
    state.ball.strokes += 1;
    state.phase = StrokePhase::Executing;
    log::info!(
        "Stroke {}: {} at {:.0} units/s",
        state.ball.strokes,
        if putter { "putter" } else { state.club_spec().label },
        v0.length()
    );
    events.push(GameEvent::Shot {
        strokes: state.ball.strokes,
    });
}

fn step_ball(state: &mut HoleState, dt: f32, events: &mut Vec<GameEvent>) {
    let club = if state.putter_stroke {
        &PUTTER
    } else {
        state.ball.club.spec()
    };
    let terrain = Terrain {
        hole: &state.hole,
        world: &state.world,
        trees: &state.trees,
    };
    let result = advance_ball(&mut state.ball.pos, &mut state.ball.vel, club, &terrain, dt);

    match result {
        StepResult::Rolling => track_zones(state, events),
        StepResult::Stopped(lie) => {
            log::debug!(
                "Ball at rest on {} at ({:.0}, {:.0})",
                lie.as_str(),
                state.ball.pos.x,
                state.ball.pos.y
            );
            track_zones(state, events);
            state.phase = StrokePhase::Settled;
        }
        StepResult::OutOfBounds => {
            apply_penalty(state, PenaltyReason::OutOfBounds, events);
            state.phase = StrokePhase::Settled;
        }
        StepResult::Cup => {
            state.ball.holed = true;
            track_zones(state, events);
            state.phase = StrokePhase::Settled;
        }
    }
}

/// Resolve a ball that just came to rest
fn settle(state: &mut HoleState, events: &mut Vec<GameEvent>) {
    if state.ball.holed {
        start_hole_out(state);
        return;
    }

    if state.lie() == LieKind::Water {
        apply_penalty(state, PenaltyReason::Water, events);
    }

    let on_green = state.lie() == LieKind::Green;
    set_putt_mode(state, on_green, events);

    if on_green && !state.putt_declined {
        enter_putting(state);
    } else {
        state.phase = StrokePhase::Aiming;
    }
}

fn step_putt(state: &mut HoleState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let Some(putt) = state.putt.as_mut() else {
        state.phase = StrokePhase::Aiming;
        return;
    };

    if input.cancel_putt {
        if let Some(world) = putt.cancel() {
            log::debug!("Putting cancelled at ({:.0}, {:.0})", world.x, world.y);
            state.ball.place(world);
            state.putt = None;
            state.putt_declined = true;
            state.phase = StrokePhase::Aiming;
        }
        return;
    }

    if input.lock_putt && putt.lock() {
        state.ball.strokes += 1;
        log::info!("Stroke {}: putt", state.ball.strokes);
        events.push(GameEvent::Shot {
            strokes: state.ball.strokes,
        });
    }

    let outcome = putt.advance(dt);
    if putt.rolling {
        state.ball.pos = putt.world_from_lane(putt.ball_x);
    }

    match outcome {
        Some(PuttOutcome::Holed) => {
            state.ball.place(state.hole.cup);
            state.ball.holed = true;
            state.putt = None;
            start_hole_out(state);
        }
        Some(PuttOutcome::Stopped { world }) => {
            state.ball.place(world);
            if state.lie() != LieKind::Green {
                // Rolled off the green
                note_lie(state, events);
                state.putt = None;
                state.phase = StrokePhase::Settled;
            }
        }
        None => {}
    }
}

fn enter_putting(state: &mut HoleState) {
    log::debug!(
        "Putting from {:.0} units out",
        state.ball.pos.distance(state.hole.cup)
    );
    state.putt = Some(PuttState::new(state.ball.pos, state.hole.cup));
    state.putt_declined = false;
    state.phase = StrokePhase::Putting;
}

fn start_hole_out(state: &mut HoleState) {
    let label = ScoreLabel::for_score(state.ball.strokes, state.hole.par);
    log::info!("Holed out in {}: {}", state.ball.strokes, label.as_str());
    state.phase = StrokePhase::HoleOut {
        remaining: HOLE_OUT_DISPLAY_SECS,
        label,
    };
}

fn set_putt_mode(state: &mut HoleState, on: bool, events: &mut Vec<GameEvent>) {
    if state.ball.putt_mode == on {
        return;
    }
    state.ball.putt_mode = on;
    if !on {
        state.putt_declined = false;
    }
    events.push(GameEvent::PuttMode { on });
}

/// One stroke, back to the last safe spot
fn apply_penalty(state: &mut HoleState, reason: PenaltyReason, events: &mut Vec<GameEvent>) {
    state.ball.strokes += 1;
    let drop = state.ball.last_safe;
    state.ball.place(drop);
    log::info!(
        "Penalty ({:?}): dropped at ({:.0}, {:.0}), {} strokes",
        reason,
        drop.x,
        drop.y,
        state.ball.strokes
    );
    events.push(GameEvent::Penalty { amount: 1, reason });
}

/// Emit `Entered` the first time the ball is on each lie
fn note_lie(state: &mut HoleState, events: &mut Vec<GameEvent>) {
    if state.ball.strokes == 0 || !state.world.contains(state.ball.pos) {
        return;
    }
    let lie = state.lie();
    if state.ball.entered.mark(lie) {
        events.push(GameEvent::Entered { lie });
    }
}

/// Per-frame zone bookkeeping while the ball rolls: first entries and
/// green entry/exit
fn track_zones(state: &mut HoleState, events: &mut Vec<GameEvent>) {
    note_lie(state, events);
    if state.world.contains(state.ball.pos) {
        let on_green = state.lie() == LieKind::Green;
        set_putt_mode(state, on_green, events);
    }
}

fn track_safe_spot(state: &mut HoleState) {
    let ball = &state.ball;
    if ball.speed() < SAFE_SPEED && state.world.contains(ball.pos) && state.lie() != LieKind::Water
    {
        state.ball.last_safe = state.ball.pos;
    }
}
