use std::io;

use log::info;

use crate::clock::Clock;
use crate::config::Palette;
use crate::draw::Canvas;
use crate::game::GameState;
use crate::input::{GameInput, InputSource};

/// Collaborators the game loop drives: display, input, and pacing.
pub struct GameContext<C, I, K> {
    pub canvas: C,
    pub input: I,
    pub clock: K,
    pub palette: Palette,
    pub ticks_per_second: u32,
}

/// Runs ticks until a quit input arrives. Returns the number of ticks played.
pub fn run<C, I, K>(context: &mut GameContext<C, I, K>, state: &mut GameState) -> io::Result<u64>
where
    C: Canvas,
    I: InputSource,
    K: Clock,
{
    info!(
        "session started on {}x{} at {} ticks/s",
        state.bounds().width,
        state.bounds().height,
        context.ticks_per_second
    );
    let start_tick = state.tick_count;

    loop {
        if drain_input(&mut context.input, state)? {
            break;
        }

        let report = state.tick();
        state.draw(&mut context.canvas, &report, &context.palette);
        context.canvas.present()?;

        context.clock.tick(context.ticks_per_second);
    }

    let played = state.tick_count - start_tick;
    info!(
        "session ended after {played} ticks and {} resets",
        state.reset_count
    );
    Ok(played)
}

/// Applies every queued input. Returns true when quit was requested.
fn drain_input<I: InputSource>(input: &mut I, state: &mut GameState) -> io::Result<bool> {
    let mut quit = false;
    while let Some(event) = input.poll_input()? {
        match event {
            GameInput::Quit => quit = true,
            other => state.apply_input(other),
        }
    }

    Ok(quit)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use crate::clock::Clock;
    use crate::config::{GridSize, Palette};
    use crate::draw::tests::{DrawCall, RecordingCanvas};
    use crate::food::Food;
    use crate::game::GameState;
    use crate::grid::Position;
    use crate::input::{Direction, GameInput, InputSource};

    use super::{GameContext, run};

    /// Serves one batch of inputs per tick; an exhausted script quits.
    struct ScriptedInput {
        batches: VecDeque<Vec<GameInput>>,
        current: VecDeque<GameInput>,
        started: bool,
    }

    impl ScriptedInput {
        fn new(batches: Vec<Vec<GameInput>>) -> Self {
            Self {
                batches: batches.into(),
                current: VecDeque::new(),
                started: false,
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
            if !self.started {
                self.started = true;
                self.current = self
                    .batches
                    .pop_front()
                    .unwrap_or_else(|| vec![GameInput::Quit])
                    .into();
            }

            match self.current.pop_front() {
                Some(input) => Ok(Some(input)),
                None => {
                    self.started = false;
                    Ok(None)
                }
            }
        }
    }

    #[derive(Default)]
    struct CountingClock {
        ticks: u32,
    }

    impl Clock for CountingClock {
        fn tick(&mut self, _ticks_per_second: u32) -> Duration {
            self.ticks += 1;
            Duration::ZERO
        }
    }

    fn context(batches: Vec<Vec<GameInput>>) -> GameContext<RecordingCanvas, ScriptedInput, CountingClock> {
        GameContext {
            canvas: RecordingCanvas::default(),
            input: ScriptedInput::new(batches),
            clock: CountingClock::default(),
            palette: Palette::default(),
            ticks_per_second: 13,
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 8,
                height: 8,
            },
            21,
        );
        state.food = Food::new(Position { x: 0, y: 7 });
        state
    }

    #[test]
    fn quit_before_first_tick_plays_nothing() {
        let mut context = context(vec![vec![GameInput::Quit]]);
        let mut state = state();

        let played = run(&mut context, &mut state).expect("loop should exit cleanly");

        assert_eq!(played, 0);
        assert_eq!(context.canvas.frames, 0);
        assert_eq!(context.clock.ticks, 0);
    }

    #[test]
    fn each_tick_renders_and_waits_once() {
        let mut context = context(vec![vec![], vec![], vec![]]);
        let mut state = state();

        let played = run(&mut context, &mut state).expect("loop should exit cleanly");

        assert_eq!(played, 3);
        assert_eq!(context.canvas.frames, 3);
        assert_eq!(context.clock.ticks, 3);
        assert_eq!(state.snake.head(), Position { x: 7, y: 4 });
    }

    #[test]
    fn inputs_are_drained_and_last_request_wins() {
        let mut context = context(vec![vec![
            GameInput::Direction(Direction::Down),
            GameInput::Direction(Direction::Up),
        ]]);
        let mut state = state();

        run(&mut context, &mut state).expect("loop should exit cleanly");

        assert_eq!(state.snake.head(), Position { x: 4, y: 3 });
        assert!(
            context
                .canvas
                .calls
                .contains(&DrawCall::Erase(Position { x: 4, y: 4 }))
        );
    }

    #[test]
    fn quit_mid_batch_still_applies_earlier_inputs_but_stops() {
        let mut context = context(vec![
            vec![],
            vec![GameInput::Direction(Direction::Down), GameInput::Quit],
        ]);
        let mut state = state();

        let played = run(&mut context, &mut state).expect("loop should exit cleanly");

        assert_eq!(played, 1);
        assert_eq!(state.snake.pending_direction(), Some(Direction::Down));
    }
}
