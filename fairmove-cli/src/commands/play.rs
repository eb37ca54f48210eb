use super::render_table;
use anyhow::Context;
use fairmove_core::{GameConfig, GameSession, Outcome, Response};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub async fn handle_play_command(config: GameConfig) -> anyhow::Result<()> {
    let mut session = GameSession::new(config)?;
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    play_round(&mut session, input, &mut stdout).await
}

/// Play one round: commit, print the menu, read one line, then resolve and reveal.
///
/// Nothing is read from `input` until the digest has been written and flushed.
pub async fn play_round<I, W>(
    session: &mut GameSession,
    mut input: I,
    out: &mut W,
) -> anyhow::Result<()>
where
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let digest = session.commit()?;

    writeln!(out, "HMAC: {}", digest)?;
    writeln!(out, "Available moves:")?;
    for (i, name) in session.moves().iter().enumerate() {
        writeln!(out, "{} - {}", i + 1, name)?;
    }
    writeln!(out, "0 - exit")?;
    writeln!(out, "? - help")?;
    write!(out, "Enter your move: ")?;
    out.flush()?;

    // EOF leaves the line empty and non-UTF-8 bytes become U+FFFD; both are invalid selections
    let mut buf = Vec::new();
    input
        .read_until(b'\n', &mut buf)
        .await
        .context("failed to read move")?;
    let line = String::from_utf8_lossy(&buf);

    match session.submit(&line)? {
        Response::Help(table) => {
            writeln!(out)?;
            writeln!(out, "Help Table:")?;
            writeln!(out, "{}", render_table(&table))?;
        }
        Response::Aborted(_) => {
            writeln!(out, "Invalid move. Exiting game.")?;
        }
        Response::Resolved(result) => {
            writeln!(out, "Your move: {}", result.human_move)?;
            writeln!(out, "Computer move: {}", result.computer_move)?;
            writeln!(out, "Result: {}", describe(result.outcome))?;

            let key = session.reveal()?;
            writeln!(out, "HMAC key: {}", key)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn describe(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "You Win!",
        Outcome::Lose => "You Lose!",
        Outcome::Draw => "You Draw!",
    }
}
