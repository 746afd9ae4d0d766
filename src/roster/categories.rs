// Closed category schemas for ratings and raw stats.
//
// The nine rating categories and eleven detailed-stat categories are fixed
// league-wide. Modeling them as enums with total accessors on the line
// structs means "every category present" holds by construction instead of
// by runtime convention over a keyed map.

// ---------------------------------------------------------------------------
// Rating categories (nine)
// ---------------------------------------------------------------------------

/// A head-to-head rating category as scored by the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaterCategory {
    Fg,
    Ft,
    ThreePm,
    Reb,
    Ast,
    Stl,
    Blk,
    Turnovers,
    Pts,
}

impl RaterCategory {
    /// Every rating category, in display order.
    pub const ALL: [RaterCategory; 9] = [
        RaterCategory::Fg,
        RaterCategory::Ft,
        RaterCategory::ThreePm,
        RaterCategory::Reb,
        RaterCategory::Ast,
        RaterCategory::Stl,
        RaterCategory::Blk,
        RaterCategory::Turnovers,
        RaterCategory::Pts,
    ];

    /// Short display label, matching the league's column headers.
    pub fn label(self) -> &'static str {
        match self {
            RaterCategory::Fg => "FG",
            RaterCategory::Ft => "FT",
            RaterCategory::ThreePm => "3PM",
            RaterCategory::Reb => "REB",
            RaterCategory::Ast => "AST",
            RaterCategory::Stl => "STL",
            RaterCategory::Blk => "BLK",
            RaterCategory::Turnovers => "TO",
            RaterCategory::Pts => "PTS",
        }
    }
}

/// Per-category rating values for one player (or one trade side).
///
/// Always carries all nine categories; absent source data reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaterLine {
    pub fg: f64,
    pub ft: f64,
    pub three_pm: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub turnovers: f64,
    pub pts: f64,
}

impl RaterLine {
    pub fn get(&self, category: RaterCategory) -> f64 {
        match category {
            RaterCategory::Fg => self.fg,
            RaterCategory::Ft => self.ft,
            RaterCategory::ThreePm => self.three_pm,
            RaterCategory::Reb => self.reb,
            RaterCategory::Ast => self.ast,
            RaterCategory::Stl => self.stl,
            RaterCategory::Blk => self.blk,
            RaterCategory::Turnovers => self.turnovers,
            RaterCategory::Pts => self.pts,
        }
    }

    pub fn set(&mut self, category: RaterCategory, value: f64) {
        match category {
            RaterCategory::Fg => self.fg = value,
            RaterCategory::Ft => self.ft = value,
            RaterCategory::ThreePm => self.three_pm = value,
            RaterCategory::Reb => self.reb = value,
            RaterCategory::Ast => self.ast = value,
            RaterCategory::Stl => self.stl = value,
            RaterCategory::Blk => self.blk = value,
            RaterCategory::Turnovers => self.turnovers = value,
            RaterCategory::Pts => self.pts = value,
        }
    }
}

// ---------------------------------------------------------------------------
// Detailed stat categories (eleven)
// ---------------------------------------------------------------------------

/// A raw counting-stat category from the season feed.
///
/// Makes and attempts are tracked separately for both shooting splits so the
/// trade simulator can recompute percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Fgm,
    Fga,
    Ftm,
    Fta,
    ThreePm,
    Reb,
    Ast,
    Stl,
    Blk,
    Turnovers,
    Pts,
}

impl StatCategory {
    /// Every stat category, in display order.
    pub const ALL: [StatCategory; 11] = [
        StatCategory::Fgm,
        StatCategory::Fga,
        StatCategory::Ftm,
        StatCategory::Fta,
        StatCategory::ThreePm,
        StatCategory::Reb,
        StatCategory::Ast,
        StatCategory::Stl,
        StatCategory::Blk,
        StatCategory::Turnovers,
        StatCategory::Pts,
    ];

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Fgm => "FGM",
            StatCategory::Fga => "FGA",
            StatCategory::Ftm => "FTM",
            StatCategory::Fta => "FTA",
            StatCategory::ThreePm => "3PM",
            StatCategory::Reb => "REB",
            StatCategory::Ast => "AST",
            StatCategory::Stl => "STL",
            StatCategory::Blk => "BLK",
            StatCategory::Turnovers => "TO",
            StatCategory::Pts => "PTS",
        }
    }
}

/// Season totals for one player across all eleven stat categories.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatLine {
    pub fgm: f64,
    pub fga: f64,
    pub ftm: f64,
    pub fta: f64,
    pub three_pm: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub turnovers: f64,
    pub pts: f64,
}

impl StatLine {
    pub fn get(&self, category: StatCategory) -> f64 {
        match category {
            StatCategory::Fgm => self.fgm,
            StatCategory::Fga => self.fga,
            StatCategory::Ftm => self.ftm,
            StatCategory::Fta => self.fta,
            StatCategory::ThreePm => self.three_pm,
            StatCategory::Reb => self.reb,
            StatCategory::Ast => self.ast,
            StatCategory::Stl => self.stl,
            StatCategory::Blk => self.blk,
            StatCategory::Turnovers => self.turnovers,
            StatCategory::Pts => self.pts,
        }
    }

    pub fn set(&mut self, category: StatCategory, value: f64) {
        match category {
            StatCategory::Fgm => self.fgm = value,
            StatCategory::Fga => self.fga = value,
            StatCategory::Ftm => self.ftm = value,
            StatCategory::Fta => self.fta = value,
            StatCategory::ThreePm => self.three_pm = value,
            StatCategory::Reb => self.reb = value,
            StatCategory::Ast => self.ast = value,
            StatCategory::Stl => self.stl = value,
            StatCategory::Blk => self.blk = value,
            StatCategory::Turnovers => self.turnovers = value,
            StatCategory::Pts => self.pts = value,
        }
    }

    /// Component-wise sum of two stat lines.
    pub fn add(&self, other: &StatLine) -> StatLine {
        let mut out = *self;
        for category in StatCategory::ALL {
            out.set(category, self.get(category) + other.get(category));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
