use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Icon shown next to a notification message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Coins,
    Lose,
    /// Food graphic, by catalog key.
    Food(String),
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icon::Coins => f.write_str("game:coins"),
            Icon::Lose => f.write_str("game:lose"),
            Icon::Food(key) => write!(f, "food:{key}"),
        }
    }
}

/// What to do once the player dismisses a notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    StartPlaying,
    PlayAgain,
}

/// Dismissible message for the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub icon: Icon,
    pub message: String,
    pub button: String,
    pub on_dismiss: Option<Continuation>,
}

impl Notification {
    fn new(icon: Icon, message: String, button: &str, on_dismiss: Option<Continuation>) -> Self {
        Self {
            icon,
            message,
            button: button.into(),
            on_dismiss,
        }
    }

    pub fn start(coins: Coins, recipe: &str) -> Self {
        Self::new(
            Icon::Coins,
            format!("Here's {coins} Coins To Start Your {recipe}"),
            "I'm Ready!",
            Some(Continuation::StartPlaying),
        )
    }

    pub fn ingredient_found(key: &str, name: &str, left: usize) -> Self {
        let noun = if left > 1 { "ingredients" } else { "ingredient" };
        Self::new(
            Icon::Food(key.into()),
            format!("You found {name}!  Just {left} {noun} left."),
            "Yay!",
            None,
        )
    }

    pub fn almost_out() -> Self {
        Self::new(
            Icon::Coins,
            "Warning You're Almost Out Of Money".into(),
            "Got It!",
            None,
        )
    }

    pub fn running_low() -> Self {
        Self::new(
            Icon::Coins,
            "Warning You're Running Low On Money".into(),
            "Got It!",
            None,
        )
    }

    pub fn won(coins: Coins) -> Self {
        Self::new(
            Icon::Coins,
            format!("Congratulations!  You Won with {coins} coins!"),
            "Play Again?",
            Some(Continuation::PlayAgain),
        )
    }

    pub fn lost(reason: &LoseReason) -> Self {
        Self::new(
            Icon::Lose,
            format!("{reason}"),
            "Play Again?",
            Some(Continuation::PlayAgain),
        )
    }
}

/// Change notifications for the renderer, drained after each command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged(GameState),
    CoinsChanged(Coins),
    TileFlipped(Coord2),
    /// Every tile of a food was discovered and the whole shape is flipped.
    FoodRevealed { food: FoodId, tiles: Vec<Coord2> },
    Notify(Notification),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn icon_references() {
        assert_eq!(Icon::Coins.to_string(), "game:coins");
        assert_eq!(Icon::Lose.to_string(), "game:lose");
        assert_eq!(Icon::Food("tomato".into()).to_string(), "food:tomato");
    }

    #[test]
    fn ingredient_found_pluralizes() {
        let one = Notification::ingredient_found("egg", "Egg", 1);
        let two = Notification::ingredient_found("egg", "Egg", 2);

        assert_eq!(one.message, "You found Egg!  Just 1 ingredient left.");
        assert_eq!(two.message, "You found Egg!  Just 2 ingredients left.");
        assert_eq!(one.on_dismiss, None);
    }

    #[test]
    fn start_and_end_notifications_continue() {
        let start = Notification::start(20, "Salad");

        assert_eq!(start.message, "Here's 20 Coins To Start Your Salad");
        assert_eq!(start.button, "I'm Ready!");
        assert_eq!(start.on_dismiss, Some(Continuation::StartPlaying));
        assert_eq!(
            Notification::won(31).on_dismiss,
            Some(Continuation::PlayAgain)
        );
        assert_eq!(
            Notification::lost(&LoseReason::OutOfMoney).message,
            "You've run out of money looking for ingredients."
        );
    }
}
