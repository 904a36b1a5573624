use std::{io::{stdout, Read, Write}, collections::VecDeque, thread, time::Duration};
use structopt::StructOpt;

use termion::{
    raw::IntoRawMode,
    input::{TermRead, MouseTerminal, Events},
    event::{Key, MouseButton, Event, MouseEvent},
};

mod board;
use board::{Board, Outcome, Snapshot};

mod clock;
use clock::Clock;

mod opts;
use opts::Opts;

mod score;
use score::{ScoreBook, ScoreCard};

mod solver;
use solver::Solver;

mod util;

enum Direction {
    Up,
    Left,
    Down,
    Right,
}

enum Action {
    Mark,
    Dig,
    Solve,
    ExitGame,
    Move(Direction),
    JumpTo((usize, usize)),
}

impl Direction {
    /// One cell over, or `from` itself at the board's edge.
    fn step(&self, (x, y): (usize, usize), board: &Board) -> (usize, usize) {
        let next = match self {
            Direction::Up => (Some(x), y.checked_sub(1)),
            Direction::Left => (x.checked_sub(1), Some(y)),
            Direction::Down => (Some(x), Some(y + 1)),
            Direction::Right => (Some(x + 1), Some(y)),
        };
        match next {
            (Some(x), Some(y)) if board.is_loc((x, y)) => (x, y),
            _ => (x, y),
        }
    }
}

struct Input {
    action: Action,
    point: (usize, usize),
}

enum GameEnd {
    Finished,
    Quit,
}

/// How long the loop sleeps when no input is waiting.
const TICK: Duration = Duration::from_millis(50);

/// `Ok(None)` when nothing usable is waiting.
fn read_input<R: Read>(stream: &mut Events<R>) -> Result<Option<(Action, Option<Action>)>, ()> {
    let next_event = match stream.next() {
        Some(ev) => ev,
        None => return Ok(None),
    };
    match next_event {
        Err(_) => Err(()),
        Ok(ev) => match ev {
            Event::Unsupported(_) => Ok(None),
            Event::Key(k) => {
                let action = match k {
                    Key::Up | Key::Char('w') | Key::Char('k') =>
                        Some(Action::Move(Direction::Up)),
                    Key::Left | Key::Char('a') | Key::Char('h') =>
                        Some(Action::Move(Direction::Left)),
                    Key::Down | Key::Char('s') | Key::Char('j') =>
                        Some(Action::Move(Direction::Down)),
                    Key::Right | Key::Char('d') | Key::Char('l') =>
                        Some(Action::Move(Direction::Right)),
                    Key::Char('m') => Some(Action::Mark),
                    Key::Char('u') => Some(Action::Dig),
                    Key::Char('q') => Some(Action::ExitGame),
                    Key::Char('!') => Some(Action::Solve),
                    _ => None,
                };
                Ok(action.map(|a| (a, None)))
            },
            Event::Mouse(m) => match m {
                MouseEvent::Release(_, _) => Ok(None),
                MouseEvent::Hold(_, _) => Ok(None),
                MouseEvent::Press(button, x, y) => {
                    let action = match button {
                        MouseButton::Left => Action::Dig,
                        MouseButton::Right => Action::Mark,
                        _ => return Ok(None),
                    };

                    loop {
                        match stream.next() {
                            None => thread::sleep(TICK),
                            Some(Err(_)) => return Ok(None),
                            // Ignore until we hit a release.
                            Some(Ok(e)) => {
                                if let Event::Mouse(MouseEvent::Release(x_up, y_up)) = e {
                                    if (x_up, y_up) == (x, y) {
                                        // Input events are 1 indexed.
                                        let coords = (x_up as usize - 1, y_up as usize - 1);
                                        return Ok(Some(
                                            (Action::JumpTo(coords), Some(action))
                                        ));
                                    } else {
                                        return Ok(None);
                                    }
                                }
                            }
                        }
                    }
                },
            }
        },
    }
}

fn print_status<W: Write>(output: &mut W, board: &Board, clock: &Clock, status: &str) {
    let size = termion::terminal_size().expect("no problem getting the terminal size.");
    write!(
        output,
        "{}{}mines left: {}  open counts: {}  time: {}  {}",
        termion::cursor::Goto(1, size.1.max(1)),
        termion::clear::CurrentLine,
        board.mines_left(),
        board.frontier().len(),
        clock.describe(),
        status,
    ).expect("write to be fine.");
}

fn print_board<W: Write>(
    output: &mut W,
    board: &Board,
    top_left: (usize, usize),
    current_point: (usize, usize),
) -> Option<(usize, usize)> {
    let mut new_top_left = top_left;
    let size = termion::terminal_size().expect("no problem getting the terminal size.");
    // Bottom row is kept for the status line.
    let size = (size.0 as usize, (size.1 as usize).saturating_sub(1));
    if size.0 == 0 || size.1 == 0 {
        return None;
    }
    let bot_right = (top_left.0 + size.0, top_left.1 + size.1);
    if current_point.0 >= bot_right.0 {
        new_top_left.0 = current_point.0 + 1 - size.0;
    }
    if current_point.0 < top_left.0 {
        new_top_left.0 = current_point.0;
    }
    if current_point.1 >= bot_right.1 {
        new_top_left.1 = current_point.1 + 1 - size.1;
    }
    if current_point.1 < top_left.1 {
        new_top_left.1 = current_point.1;
    }

    let snippet = board.display(size, new_top_left);

    write!(output, "{}{}", termion::clear::All, termion::cursor::Goto(1, 1))
       .expect("write to be fine.");
    for row in &snippet[..] {
        for cell in &row[..] {
            write!(output, "{}", cell).expect("output to standard out without an issue.");
        }
        write!(output, "\n\r").expect("write to be fine.");
    }

    Some(new_top_left)
}

fn place_cursor<W: Write>(output: &mut W, top_left: (usize, usize), current_point: (usize, usize)) {
    write!(
        output,
        "{}",
        termion::cursor::Goto(
            (current_point.0.saturating_sub(top_left.0) + 1) as u16,
            (current_point.1.saturating_sub(top_left.1) + 1) as u16,
        ),
    ).expect("write to be fine.");
    output.flush().expect("flush to be fine.");
}

/// Scores the finished game and records it.
fn finish<W: Write>(
    output: &mut W,
    board: &Board,
    snapshot: Snapshot,
    clock: &Clock,
    book: &ScoreBook,
) {
    let card = ScoreCard {
        width: board.w(),
        height: board.h(),
        mines: board.num_mines(),
        max_time: clock.limit(),
        elapsed_secs: clock.elapsed_secs(),
        settled: snapshot.revealed + snapshot.flagged,
        won: snapshot.outcome == Some(Outcome::Won),
    };
    let score = card.score();
    let size = termion::terminal_size().expect("no problem getting the terminal size.");
    write!(output, "{}{}", termion::cursor::Goto(1, size.1.max(1)), termion::clear::CurrentLine)
        .expect("write to be fine.");
    let verdict = match snapshot.outcome {
        Some(Outcome::Won) => "Congratulations!",
        _ => "You have died!",
    };
    write!(
        output,
        "{} {} of {} cells settled. Score: {}\n\r",
        verdict,
        card.settled,
        snapshot.cells,
        score,
    ).expect("write to be fine.");

    if let Err(e) = book.record(score) {
        write!(output, "{}\n\r", e).expect("write to be fine.");
    }
    let written = match book.high_score() {
        Ok(Some(high)) => write!(output, "High score: {}\n\r", high),
        Ok(None) => Ok(()),
        Err(e) => write!(output, "{}\n\r", e),
    };
    written.expect("write to be fine.");
}

/// Runs one game on `board` until it ends or the player leaves.
fn play<W: Write, R: Read>(
    output: &mut W,
    events: &mut Events<R>,
    board: &mut Board,
    clock: &mut Clock,
    book: &ScoreBook,
) -> GameEnd {
    let mut current_point = (0, 0);
    let mut queued_actions = VecDeque::new();
    let mut top_left = (0, 0);
    let mut status = String::new();
    if let Some(new_top_left) = print_board(output, board, top_left, current_point) {
        top_left = new_top_left;
    }
    print_status(output, board, clock, &status);
    place_cursor(output, top_left, current_point);
    let mut shown_time = clock.describe();

    loop {
        let input = match queued_actions.pop_front() {
            Some(action) => Some(Input {
                action,
                point: current_point,
            }),
            None => match read_input(events) {
                Ok(Some((action, secondary))) => {
                    if let Some(to_queue) = secondary {
                        queued_actions.push_back(to_queue)
                    }
                    Some(Input {
                        action,
                        point: current_point,
                    })
                },
                Ok(None) => None,
                // Input is gone.
                Err(_) => return GameEnd::Quit,
            },
        };

        if clock.expired() {
            board.expire();
        }

        let previous_point = current_point;
        let acted = input.is_some();
        let res = match input.map(|i| (i.action, i.point)) {
            None => {
                thread::sleep(TICK);
                Ok(())
            },
            Some((Action::ExitGame, _)) => return GameEnd::Quit,
            Some((Action::Solve, _)) => match Solver::new(board).run_to_fixed_point() {
                Ok(pass) => {
                    status = pass.to_string();
                    Ok(())
                },
                Err(e) => Err(e.to_string()),
            },
            Some((Action::Mark, point)) => board.right_click(point).map_err(|e| e.to_string()),
            Some((Action::Dig, point)) => {
                clock.start();
                board.left_click(point).map_err(|e| e.to_string())
            },
            Some((Action::JumpTo(p), _)) => {
                let p = (p.0 + top_left.0, p.1 + top_left.1);
                if board.is_loc(p) {
                    current_point = p;
                }
                Ok(())
            },
            Some((Action::Move(d), _)) => {
                current_point = d.step(current_point, board);
                Ok(())
            },
        };
        if let Err(e) = res {
            status = e;
        }

        let changed = !board.drain_changed().is_empty();
        let terminal = board.is_terminal();
        if changed || current_point != previous_point || terminal {
            if let Some(new_top_left) = print_board(output, board, top_left, current_point) {
                top_left = new_top_left;
            }
        }
        let time = clock.describe();
        if acted || changed || terminal || time != shown_time {
            shown_time = time;
            print_status(output, board, clock, &status);
            place_cursor(output, top_left, current_point);
        }

        if let Some(snapshot) = board.take_finished() {
            finish(output, board, snapshot, clock, book);
            return GameEnd::Finished;
        }
    }
}

/// Waits for a yes or no. Anything but `y` ends the session.
fn ask_again<W: Write, R: Read>(output: &mut W, events: &mut Events<R>) -> bool {
    write!(output, "Play again? (y/n)").expect("write to be fine.");
    output.flush().expect("flush to be fine.");
    loop {
        match events.next() {
            None => thread::sleep(TICK),
            Some(Ok(Event::Key(Key::Char('y')))) | Some(Ok(Event::Key(Key::Char('Y')))) => return true,
            Some(Ok(Event::Key(_))) | Some(Err(_)) => return false,
            Some(Ok(_)) => {},
        }
    }
}

fn main() {
    let cfg = Opts::from_args();

    let mut board = match cfg.build_board() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Cannot build that board: {}.", e);
            std::process::exit(2);
        },
    };
    let book = ScoreBook::new(cfg.scores.clone());
    let mut clock = Clock::new(cfg.max_time.secs());

    println!("{}{}", termion::clear::All, termion::cursor::Goto(1, 1));
    println!("\
Hello, and welcome to Minesweeper.
Press:
\tup/w/k to move up
\tleft/a/h to move left
\tdown/s/j to move down
\tright/d/l to move right
\tm/right click to flag
\tu/left click on a hidden tile to reveal
\tu/left click on an exposed tile to chord
\t! to let the solver make every move it is sure of
\tq to quit

Scores go to {}.
Press any key to continue.", book.path().display());

    let mut stdout = MouseTerminal::from(stdout().into_raw_mode().expect("terminal to enter raw mode."));
    let mut events = termion::async_stdin().events();
    while events.next().is_none() {
        thread::sleep(TICK);
    }

    loop {
        if let GameEnd::Quit = play(&mut stdout, &mut events, &mut board, &mut clock, &book) {
            break;
        }
        if !ask_again(&mut stdout, &mut events) {
            break;
        }
        board = match cfg.build_board() {
            Ok(board) => board,
            Err(e) => {
                write!(stdout, "\n\rCannot build that board: {}.", e).expect("write to be fine.");
                break;
            },
        };
        clock = Clock::new(cfg.max_time.secs());
    }

    write!(stdout, "\n\rThanks for playing! Farewell.\n\r")
        .expect("write to be fine.");
}
