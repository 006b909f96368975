//! Every line the referee can send to a player.
//!
//! Clients print what they receive verbatim, so these strings ARE the user
//! interface. Keeping them together makes the wording easy to audit and
//! lets tests assert on the exact text players see.

use crate::{MAX_MESSAGE_LENGTH, Role};

// ---------------------------------------------------------------------------
// Connection lifecycle
// ---------------------------------------------------------------------------

/// The welcome block sent right after a connection is seated.
pub fn welcome(name: &str, role: Role) -> String {
    format!(
        "Hello Player!\nWelcome to Werewolf!\n\
         The horror will start soon but for now. Your username will be: {name}\n\
         Your role is: {role}\n\
         The Game will start shortly!\n"
    )
}

/// Told to everyone else when a participant's connection is lost.
pub fn disconnected(name: &str) -> String {
    format!(
        "{name} has disconnected and will be considered dead for the rest of the game, if not already.\n"
    )
}

/// One relayed chat line.
///
/// The message is cut short, on a character boundary, so the whole line
/// still fits in one frame.
pub fn chat(sender: &str, message: &str) -> String {
    let room = MAX_MESSAGE_LENGTH.saturating_sub(sender.len() + ": \n".len());
    let mut end = message.len().min(room);
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{sender}: {}\n", &message[..end])
}

/// A list of names, one per line.
pub fn name_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().map(|name| format!("{name}\n")).collect()
}

// ---------------------------------------------------------------------------
// Night: seer
// ---------------------------------------------------------------------------

pub const SEER_PROMPT: &str = "Type the name of a player you would like to check the role of: \n";
pub const SEER_RETRY: &str = "You have entered an invalid input, try again: \n";

/// The seer's private answer.
pub fn seer_reveal(name: &str, role: Role) -> String {
    format!("{name} is a {role}.\n")
}

// ---------------------------------------------------------------------------
// Night: werewolves
// ---------------------------------------------------------------------------

/// Opens the werewolves' private discussion.
pub fn werewolf_briefing(seconds: u64) -> String {
    format!(
        "You will be given {seconds} seconds to decide amongst yourselves who you would like to kill.\n\
         Here are the users you may kill.\n"
    )
}

pub const WEREWOLF_DECIDE: &str = "Time is up. Choose one player to slaughter.\n";
pub const WEREWOLF_WAIT: &str = "The other werewolf will choose someone to die.\n";
pub const WEREWOLF_RETRY: &str = "You have entered an invalid input. Please try again: \n";

// ---------------------------------------------------------------------------
// Night: guard
// ---------------------------------------------------------------------------

pub const GUARD_PROMPT: &str = "Choose a player you would like to save:\n";
pub const GUARD_RETRY: &str = "You have entered an invalid input. Please try again.\n";

// ---------------------------------------------------------------------------
// Night: witch
// ---------------------------------------------------------------------------

/// Tells the witch who is about to die, if anyone.
pub fn witch_dying(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{name} is dying.\n"),
        None => "No one is dying.\n".to_string(),
    }
}

pub const WITCH_SAVE_PROMPT: &str = "Do you want to save? (y/n)\n";
pub const WITCH_SAVE_USED: &str = "You used your save potion.\n";
pub const WITCH_KILL_PROMPT: &str = "Do you want to kill? (y/n)\n";
pub const WITCH_KILL_USED: &str = "You used your kill potion.\n";
pub const WITCH_KILL_TARGET: &str = "Who do you want to kill?\n";
pub const INVALID_USERNAME: &str = "Invalid username, please re-enter.\n";
/// The named player exists but is no longer alive.
pub const USER_GONE: &str = "User is no longer with us, please re-enter.\n";

// ---------------------------------------------------------------------------
// Night: hunter
// ---------------------------------------------------------------------------

pub const HUNTER_PROMPT: &str = "The night has arrived. You now have a chance to mark an unfortunate victim who will join you in Death if the chance ever arise!\n";

// ---------------------------------------------------------------------------
// Night: outcome
// ---------------------------------------------------------------------------

pub const PEACEFUL_NIGHT: &str = "It has been a peaceful night, nobody dies.\n";

/// Announces the night's deaths.
pub fn night_deaths(names: &[&str]) -> String {
    format!("The following users died: {}\n", names.join(", "))
}

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

/// Opens the public discussion.
pub fn day_briefing(seconds: u64) -> String {
    format!("You will be given {seconds} seconds to discuss who you would like to vote out.\n")
}

pub const VOTE_PROMPT: &str = "Please enter a player's name:\n";
pub const VOTE_RETRY: &str = "Invalid input, enter a real player's name who is alive:\n";
pub const VOTE_TIE: &str = "There was a tie, no one will die.\n";

/// Announces the player voted out and reveals their role.
pub fn voted_out(name: &str, role: Role) -> String {
    format!("{name} has been voted out. They were a: {role}\n")
}

// ---------------------------------------------------------------------------
// Endings
// ---------------------------------------------------------------------------

pub const ALL_DEAD: &str = "No one wins! All are dead.\n";
pub const VILLAGERS_WIN: &str = "Villagers win! All werewolves are dead.\n";
pub const WEREWOLVES_WIN: &str = "Werewolves win! Werewolves are at least half of the remaining players.\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_names_player_and_role() {
        let text = welcome("Player 4", Role::Witch);
        assert!(text.contains("Your username will be: Player 4\n"));
        assert!(text.contains("Your role is: witch\n"));
    }

    #[test]
    fn test_night_deaths_joins_names() {
        assert_eq!(night_deaths(&["Player 3"]), "The following users died: Player 3\n");
        assert_eq!(
            night_deaths(&["Player 1", "Player 6"]),
            "The following users died: Player 1, Player 6\n"
        );
    }

    #[test]
    fn test_name_list_one_per_line() {
        assert_eq!(name_list(["Player 1", "Player 2"]), "Player 1\nPlayer 2\n");
        assert_eq!(name_list(std::iter::empty()), "");
    }

    #[test]
    fn test_chat_prefixes_sender() {
        assert_eq!(chat("Player 2", "hi"), "Player 2: hi\n");
    }

    #[test]
    fn test_chat_fits_one_frame() {
        let line = chat("Player 1", &"x".repeat(MAX_MESSAGE_LENGTH));
        assert_eq!(line.len(), MAX_MESSAGE_LENGTH);
        assert!(line.starts_with("Player 1: xxx"));
        assert!(line.ends_with("x\n"));

        // Never splits a multi-byte character.
        let line = chat("Player 1", &"é".repeat(MAX_MESSAGE_LENGTH));
        assert!(line.len() <= MAX_MESSAGE_LENGTH);
        assert!(line.ends_with("é\n"));
    }

    #[test]
    fn test_witch_dying() {
        assert_eq!(witch_dying(Some("Player 2")), "Player 2 is dying.\n");
        assert_eq!(witch_dying(None), "No one is dying.\n");
    }
}
