use crate::powerup::PowerUpKind;

/// Discrete events emitted by the simulation for sound/UI collaborators.
/// Drained by the shell once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PreyConsumed,
    PlayerDamaged(i32),
    PlayerPoisoned,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    LevelAdvanced(u32),
    LevelRegressed(u32),
    GameOver,
    GameWon,
}
