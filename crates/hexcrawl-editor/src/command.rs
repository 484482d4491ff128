//! Operator commands for the terminal front end.
//!
//! Each input line is one command. Commands that only touch local editor
//! state (`mode`, `terrain`, `kind`) take effect immediately; the rest are
//! [`Action`]s that talk to the backend and end with a refresh.
//!
//! ```text
//! mode <paint|site|spawn>
//! terrain <tag>                  kind <site-kind>
//! click <q> <r>
//! route <q1> <r1> <q2> <r2>
//! encounter <weight> [table]     rumor <ttl> <hops> [template]
//! weapon <penetration> [weapon]  armor <value> [armor [damage_type arc]]
//! wound <mobility> <dexterity> [wound]
//! faction <settlement> [faction]
//! simulate <days>                play
//! refresh   show   help   quit
//! ```

use hexcrawl_types::{EditorMode, HexCoord};

use crate::controller::{ActionReport, EditorController};
use crate::error::EditorError;
use crate::forms::{
    ArmorForm, EncounterForm, FactionForm, RouteForm, RumorTemplateForm, SimulateForm, WeaponForm,
    WoundForm,
};
use crate::state::EditorState;
use crate::view::RefreshOutcome;

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  mode <paint|site|spawn>             choose what a click does
  terrain <tag>                       terrain used in paint mode
  kind <site-kind>                    site kind used in site mode
  click <q> <r>                       click the cell at q,r
  route <q1> <r1> <q2> <r2>           add a patrol route
  encounter <weight> [table]          first entry weight of an encounter table
  rumor <ttl> <hops> [template]       rumor lifetime and hop limit
  weapon <penetration> [weapon]       weapon penetration
  armor <value> [armor [type arc]]    armor threshold
  wound <mobility> <dexterity> [id]   wound effect deltas
  faction <settlement> [faction]      add a settlement to a faction
  simulate <days>                     advance the world
  play                                run the scripted playtest step
  refresh                             re-fetch the world
  show                                print the current view
  help                                this text
  quit                                wait for running actions and exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the grid-click mode.
    Mode(EditorMode),
    /// Change the terrain selector.
    Terrain(String),
    /// Change the site-kind selector.
    SiteKind(String),
    /// Print the view currently on screen.
    Show,
    /// Print usage.
    Help,
    /// Stop reading input.
    Quit,
    /// Talk to the backend.
    Act(Action),
}

/// A command that issues backend requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click a grid cell.
    Click(HexCoord),
    /// Save a patrol route.
    Route(RouteForm),
    /// Tune an encounter table.
    Encounter(EncounterForm),
    /// Tune a rumor template.
    RumorTemplate(RumorTemplateForm),
    /// Tune a weapon.
    Weapon(WeaponForm),
    /// Tune an armor threshold.
    Armor(ArmorForm),
    /// Tune a wound type.
    Wound(WoundForm),
    /// Tune a faction.
    Faction(FactionForm),
    /// Advance the simulation.
    Simulate(SimulateForm),
    /// Scripted playtest step.
    Play,
    /// Re-fetch without mutating.
    Refresh,
}

/// How an action finished.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// A mutation was sent and followed by a refresh.
    Mutated(ActionReport),
    /// Only a refresh ran.
    Refreshed(RefreshOutcome),
}

impl ActionResult {
    /// Outcome of the refresh that ended the action.
    pub const fn refresh(&self) -> RefreshOutcome {
        match self {
            Self::Mutated(report) => report.refresh,
            Self::Refreshed(outcome) => *outcome,
        }
    }
}

impl Action {
    /// Run the action against `controller`, reading the grid selectors
    /// from `state`.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    pub async fn run(&self, controller: &EditorController, state: &EditorState) -> Result<ActionResult, EditorError> {
        let report = match self {
            Self::Click(coord) => controller.on_hex(state, *coord).await?,
            Self::Route(form) => controller.save_route(form).await?,
            Self::Encounter(form) => controller.save_encounter(form).await?,
            Self::RumorTemplate(form) => controller.save_rumor_template(form).await?,
            Self::Weapon(form) => controller.save_weapon(form).await?,
            Self::Armor(form) => controller.save_armor(form).await?,
            Self::Wound(form) => controller.save_wound(form).await?,
            Self::Faction(form) => controller.save_faction(form).await?,
            Self::Simulate(form) => controller.simulate_days(form).await?,
            Self::Play => controller.play().await?,
            Self::Refresh => return controller.refresh().await.map(ActionResult::Refreshed),
        };
        Ok(ActionResult::Mutated(report))
    }
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Command`] for unknown commands and wrong
    /// argument counts.
    pub fn parse(line: &str) -> Result<Option<Self>, EditorError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("mode", [mode]) => Self::Mode(
                mode.parse()
                    .map_err(|e: hexcrawl_types::ModeParseError| EditorError::Command(e.to_string()))?,
            ),
            ("terrain", [tag]) => Self::Terrain((*tag).to_owned()),
            ("kind", [kind]) => Self::SiteKind((*kind).to_owned()),
            ("show", []) => Self::Show,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            ("refresh", []) => Self::Act(Action::Refresh),
            ("play", []) => Self::Act(Action::Play),
            ("click", [q, r]) => Self::Act(Action::Click(HexCoord::new(
                parse_axis("q", q)?,
                parse_axis("r", r)?,
            ))),
            ("route", [q1, r1, q2, r2]) => Self::Act(Action::Route(RouteForm::new(q1, r1, q2, r2))),
            ("encounter", [weight]) => Self::Act(Action::Encounter(EncounterForm::new(weight))),
            ("encounter", [weight, table]) => {
                Self::Act(Action::Encounter(EncounterForm::new(weight).with_table(table)))
            }
            ("rumor", [ttl, hops]) => Self::Act(Action::RumorTemplate(RumorTemplateForm::new(ttl, hops))),
            ("rumor", [ttl, hops, template]) => Self::Act(Action::RumorTemplate(
                RumorTemplateForm::new(ttl, hops).with_template(template),
            )),
            ("weapon", [penetration]) => Self::Act(Action::Weapon(WeaponForm::new(penetration))),
            ("weapon", [penetration, weapon]) => {
                Self::Act(Action::Weapon(WeaponForm::new(penetration).with_weapon(weapon)))
            }
            ("armor", [value]) => Self::Act(Action::Armor(ArmorForm::new(value))),
            ("armor", [value, armor]) => Self::Act(Action::Armor(ArmorForm::new(value).with_armor(armor))),
            ("armor", [value, armor, damage_type, arc]) => Self::Act(Action::Armor(
                ArmorForm::new(value)
                    .with_armor(armor)
                    .with_facing(damage_type, arc),
            )),
            ("wound", [mobility, dexterity]) => Self::Act(Action::Wound(WoundForm::new(mobility, dexterity))),
            ("wound", [mobility, dexterity, wound]) => Self::Act(Action::Wound(
                WoundForm::new(mobility, dexterity).with_wound(wound),
            )),
            ("faction", [settlement]) => Self::Act(Action::Faction(FactionForm::new(settlement))),
            ("faction", [settlement, faction]) => Self::Act(Action::Faction(
                FactionForm::new(settlement).with_faction(faction),
            )),
            ("simulate", [days]) => Self::Act(Action::Simulate(SimulateForm::new(days))),
            (other, _) if KNOWN.contains(&other) => {
                return Err(EditorError::Command(format!(
                    "wrong number of arguments for `{other}` (try `help`)"
                )));
            }
            (other, _) => {
                return Err(EditorError::Command(format!("unknown command `{other}` (try `help`)")));
            }
        };
        Ok(Some(command))
    }
}

const KNOWN: [&str; 19] = [
    "mode", "terrain", "kind", "show", "help", "?", "quit", "exit", "refresh", "play", "click",
    "route", "encounter", "rumor", "weapon", "armor", "wound", "faction", "simulate",
];

/// Cell coordinates come from rendered cells, so they are always integers.
fn parse_axis(axis: &str, raw: &str) -> Result<i32, EditorError> {
    raw.parse()
        .map_err(|e| EditorError::Command(format!("{axis} must be an integer, got `{raw}`: {e}")))
}
