//! Two players matched into a quick game and played to a verdict.
//!
//! Run with `RUST_LOG=debug` to watch the lobby and the session actor work.

use fivestone_lobby::Lobby;
use fivestone_session::{GameConfig, JoinOutcome, Player, PlayerId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut lobby = Lobby::new();

    let alice = PlayerId(1);
    let bob = PlayerId(2);

    // Alice opens a quick session; Bob's matching request fills it.
    let (session_id, _) = lobby
        .join_or_create(Player::new(alice, "alice"), GameConfig::quick())
        .await?;
    let (_, outcome) = lobby
        .join_or_create(Player::new(bob, "bob"), GameConfig::quick())
        .await?;
    let JoinOutcome::Started { starting } = outcome else {
        panic!("two quick players must match into one session");
    };
    let follower = if starting == alice { bob } else { alice };

    println!("session {session_id}: {starting} opens for Black");

    // Black builds row 7 while White answers on row 8; the fifth stone
    // in the row decides it.
    let mut verdict = None;
    for col in 7..12 {
        let outcome = lobby.submit_move(starting, 7, col).await?;
        if let Some(v) = outcome.verdict {
            verdict = Some(v);
            break;
        }
        lobby.submit_move(follower, 8, col).await?;
    }

    let verdict = verdict.expect("five in a row ends the game");
    let winner = verdict.winner.expect("a combination win names a winner");
    let snapshot = lobby.snapshot(session_id).await?;
    println!(
        "{winner} wins by {} after {} turns ({} stones on the board)",
        verdict.condition,
        snapshot.round,
        snapshot.board.stones(),
    );

    lobby.destroy_session(session_id).await?;
    Ok(())
}
