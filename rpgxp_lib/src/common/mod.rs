//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Fixed integer- and string-valued enumerations referenced by the schema.
//! Each one lowers to an `Enum` schema node, which in turn gets its own
//! seeded lookup table named by the enum's camel-to-snake class name.

/// Declares a C-like enum whose `i32` values double as the seed rows of its
/// `Enum` schema lookup table. Each variant's seed name is given explicitly
/// (SCREAMING_SNAKE, matching the original `Enum` member names) rather than
/// derived from the Rust identifier, since the two don't always agree
/// (`FromVariable` vs. `FROM_VARIABLE`) and the lookup table's `name` column
/// has to match the source of truth exactly.
macro_rules! int_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr => $seed:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            pub const VARIANTS: &'static [(i32, &'static str)] = &[
                $(($value, $seed)),+
            ];

            /// Rows inserted into this enum's lookup table at DDL time. Equal to
            /// [`Self::VARIANTS`] except where noted otherwise (see [`Direction`]).
            pub const SEED_VARIANTS: &'static [(i32, &'static str)] = Self::VARIANTS;

            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn to_i32(self) -> i32 {
                self as i32
            }

            pub fn enum_name() -> &'static str {
                stringify!($name)
            }
        }
    };
}

int_enum!(ChoicesCancelType {
    Disallow = 0 => "DISALLOW", Choice1 = 1 => "CHOICE1", Choice2 = 2 => "CHOICE2",
    Choice3 = 3 => "CHOICE3", Choice4 = 4 => "CHOICE4", Branch = 5 => "BRANCH",
});

int_enum!(TextPosition { Top = 0 => "TOP", Middle = 1 => "MIDDLE", Bottom = 2 => "BOTTOM" });

int_enum!(SwitchState { On = 0 => "ON", Off = 1 => "OFF" });

int_enum!(Comparison {
    Eq = 0 => "EQ", Ge = 1 => "GE", Le = 2 => "LE", Gt = 3 => "GT", Lt = 4 => "LT", Ne = 5 => "NE",
});

/// RPG Maker's facing direction. `0` doubles as a "no direction set"
/// sentinel rather than a real facing, so — unlike every other enum in this
/// module — its lookup table is seeded with only the four real directions;
/// `0` still decodes successfully, it just isn't a seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Direction {
    None = 0,
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    pub const VARIANTS: &'static [(i32, &'static str)] =
        &[(0, "NONE"), (2, "DOWN"), (4, "LEFT"), (6, "RIGHT"), (8, "UP")];

    pub const SEED_VARIANTS: &'static [(i32, &'static str)] =
        &[(2, "DOWN"), (4, "LEFT"), (6, "RIGHT"), (8, "UP")];

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            2 => Some(Self::Down),
            4 => Some(Self::Left),
            6 => Some(Self::Right),
            8 => Some(Self::Up),
            _ => None,
        }
    }

    pub fn to_i32(self) -> i32 {
        self as i32
    }

    pub fn enum_name() -> &'static str {
        "Direction"
    }
}

int_enum!(BoundType { Lower = 0 => "LOWER", Upper = 1 => "UPPER" });

int_enum!(Button {
    Down = 0 => "DOWN", Left = 1 => "LEFT", Right = 2 => "RIGHT", Up = 3 => "UP",
    A = 4 => "A", B = 5 => "B", C = 6 => "C", X = 7 => "X", Y = 8 => "Y", Z = 9 => "Z",
    L = 10 => "L", R = 11 => "R",
});

int_enum!(ConditionType {
    Switch = 0 => "SWITCH", Variable = 1 => "VARIABLE", SelfSwitch = 2 => "SELF_SWITCH",
    Timer = 3 => "TIMER", Actor = 4 => "ACTOR", Enemy = 5 => "ENEMY", Character = 6 => "CHARACTER",
    Gold = 7 => "GOLD", Item = 8 => "ITEM", Weapon = 9 => "WEAPON", Armor = 10 => "ARMOR",
    Button = 11 => "BUTTON", Script = 12 => "SCRIPT",
});

int_enum!(AssignType {
    Substitute = 0 => "SUBSTITUTE", Add = 1 => "ADD", Subtract = 2 => "SUBTRACT",
    Multiply = 3 => "MULTIPLY", Divide = 4 => "DIVIDE", Remainder = 5 => "REMAINDER",
});

int_enum!(OperandType {
    Invariant = 0 => "INVARIANT", FromVariable = 1 => "FROM_VARIABLE", RandomNumber = 2 => "RANDOM_NUMBER",
    Item = 3 => "ITEM", Actor = 4 => "ACTOR", Enemy = 5 => "ENEMY", Character = 6 => "CHARACTER",
    Other = 7 => "OTHER",
});

int_enum!(OtherOperandType {
    MapId = 0 => "MAP_ID", PartySize = 1 => "PARTY_SIZE", Gold = 2 => "GOLD",
    StepCount = 3 => "STEP_COUNT", PlayTime = 4 => "PLAY_TIME", Timer = 5 => "TIMER",
    SaveCount = 6 => "SAVE_COUNT",
});

int_enum!(AppointType { Direct = 0 => "DIRECT", Variable = 1 => "VARIABLE", Exchange = 2 => "EXCHANGE" });

int_enum!(Weather { None = 0 => "NONE", Rain = 1 => "RAIN", Storm = 2 => "STORM", Snow = 3 => "SNOW" });

int_enum!(DiffType { Increase = 0 => "INCREASE", Decrease = 1 => "DECREASE" });

int_enum!(AnimationPosition {
    Top = 0 => "TOP", Middle = 1 => "MIDDLE", Bottom = 2 => "BOTTOM", Screen = 3 => "SCREEN",
});

int_enum!(AnimationTimingFlashScope {
    None = 0 => "NONE", Target = 1 => "TARGET", Screen = 2 => "SCREEN", DeleteTarget = 3 => "DELETE_TARGET",
});

int_enum!(AnimationTimingCondition { None = 0 => "NONE", Hit = 1 => "HIT", Miss = 2 => "MISS" });

int_enum!(ArmorKind {
    Shield = 0 => "SHIELD", Helmet = 1 => "HELMET", BodyArmor = 2 => "BODY_ARMOR", Accessory = 3 => "ACCESSORY",
});

int_enum!(ClassPosition { Front = 0 => "FRONT", Middle = 1 => "MIDDLE", Rear = 2 => "REAR" });

int_enum!(CommonEventTrigger { None = 0 => "NONE", Autorun = 1 => "AUTORUN", Parallel = 2 => "PARALLEL" });

int_enum!(EnemyActionKind { Basic = 0 => "BASIC", Skill = 1 => "SKILL" });

int_enum!(EnemyBasicAction {
    Attack = 0 => "ATTACK", Defend = 1 => "DEFEND", Escape = 2 => "ESCAPE", DoNothing = 3 => "DO_NOTHING",
});

int_enum!(Scope {
    None = 0 => "NONE", OneEnemy = 1 => "ONE_ENEMY", AllEnemies = 2 => "ALL_ENEMIES",
    OneAlly = 3 => "ONE_ALLY", AllAllies = 4 => "ALL_ALLIES", OneAllyHp0 = 5 => "ONE_ALLY_HP_0",
    AllAlliesHp0 = 6 => "ALL_ALLIES_HP_0", User = 7 => "USER",
});

int_enum!(Occasion {
    Always = 0 => "ALWAYS", OnlyInBattle = 1 => "ONLY_IN_BATTLE",
    OnlyFromTheMenu = 2 => "ONLY_FROM_THE_MENU", Never = 3 => "NEVER",
});

int_enum!(ParameterType {
    None = 0 => "NONE", MaxHp = 1 => "MAX_HP", MaxSp = 2 => "MAX_SP", Strength = 3 => "STRENGTH",
    Dexterity = 4 => "DEXTERITY", Agility = 5 => "AGILITY", Intelligence = 6 => "INTELLIGENCE",
});

int_enum!(MoveType { Fixed = 0 => "FIXED", Random = 1 => "RANDOM", Approach = 2 => "APPROACH", Custom = 3 => "CUSTOM" });

int_enum!(MoveSpeed {
    Slowest = 1 => "SLOWEST", Slower = 2 => "SLOWER", Slow = 3 => "SLOW",
    Fast = 4 => "FAST", Faster = 5 => "FASTER", Fastest = 6 => "FASTEST",
});

int_enum!(MoveFrequency {
    Lowest = 1 => "LOWEST", Lower = 2 => "LOWER", Low = 3 => "LOW",
    High = 4 => "HIGH", Higher = 5 => "HIGHER", Highest = 6 => "HIGHEST",
});

int_enum!(EventPageTrigger {
    ActionButton = 0 => "ACTION_BUTTON", ContactWithPlayer = 1 => "CONTACT_WITH_PLAYER",
    ContactWithEvent = 2 => "CONTACT_WITH_EVENT", Autorun = 3 => "AUTORUN",
    ParallelProcessing = 4 => "PARALLEL_PROCESSING",
});

int_enum!(StateRestriction {
    None = 0 => "NONE", CantUseMagic = 1 => "CANT_USE_MAGIC", AlwaysAttackEnemies = 2 => "ALWAYS_ATTACK_ENEMIES",
    AlwaysAttackAllies = 3 => "ALWAYS_ATTACK_ALLIES", CantMove = 4 => "CANT_MOVE",
});

int_enum!(TroopPageSpan { Battle = 0 => "BATTLE", Turn = 1 => "TURN", Moment = 2 => "MOMENT" });

/// Whether `ChangeItems`/`ChangeWeapons`/`ChangeArmor`'s operand is a literal
/// count or a variable holding one.
int_enum!(ConstOrVar { Const = 0 => "CONST", Variable = 1 => "VARIABLE" });

/// Whether `ChangePartyMember` adds or removes the given actor.
int_enum!(AddOrRemove { Add = 0 => "ADD", Remove = 1 => "REMOVE" });

/// `A`/`B`/`C`/`D` self-switch identifiers. Unlike the other enumerations
/// above, RPG Maker stores this one as a string, not an integer — the
/// `Enum` schema kind supports both integer-valued and string-valued enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelfSwitch {
    A,
    B,
    C,
    D,
}

impl SelfSwitch {
    pub const VARIANTS: &'static [(&'static str, &'static str)] =
        &[("A", "A"), ("B", "B"), ("C", "C"), ("D", "D")];

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_seed_rows_exclude_sentinel() {
        let pairs: Vec<(i32, &str)> = Direction::SEED_VARIANTS.to_vec();
        assert_eq!(pairs, vec![(2, "DOWN"), (4, "LEFT"), (6, "RIGHT"), (8, "UP")]);
    }

    #[test]
    fn direction_zero_still_decodes() {
        assert_eq!(Direction::from_i32(0), Some(Direction::None));
    }

    #[test]
    fn self_switch_round_trips_by_string() {
        for (raw, _) in SelfSwitch::VARIANTS {
            assert_eq!(SelfSwitch::from_str(raw).unwrap().as_str(), *raw);
        }
    }
}
