//! Sectioned CSV emission
//!
//! Output tables mirror the input layout: the fixed section echoed verbatim,
//! a blank row, then the scenario header extended with result columns and
//! one row set per scenario. The annotated variant adds a title and three
//! description rows under every header, for reading in a spreadsheet.

use crate::errors::{AppError, AppResult};
use crate::types::RawSection;
use csv::{Writer, WriterBuilder};

/// Three description rows shown under a column header
pub struct ColumnDoc {
    pub name: &'static str,
    pub lines: [&'static str; 3],
}

pub const COLUMN_DOCS: &[ColumnDoc] = &[
    // Fixed section
    ColumnDoc {
        name: "Ac",
        lines: ["active", "period", "(blocks)"],
    },
    ColumnDoc {
        name: "Ro",
        lines: ["rollover", "period", "(blocks)"],
    },
    ColumnDoc {
        name: "AS",
        lines: ["ave size", "of txs", "(vbytes)"],
    },
    ColumnDoc {
        name: "MS",
        lines: ["max size", "of txs", "(vbytes)"],
    },
    ColumnDoc {
        name: "NS",
        lines: ["node", "tx size", "(vbytes)"],
    },
    ColumnDoc {
        name: "Br",
        lines: ["branching", "factor(s)", ""],
    },
    ColumnDoc {
        name: "Dp",
        lines: ["max", "depth", "(levels)"],
    },
    ColumnDoc {
        name: "Td",
        lines: ["level", "timeout", "(blocks)"],
    },
    ColumnDoc {
        name: "Ts",
        lines: ["timeout", "schedule", "(blocks)"],
    },
    // Scenario rows
    ColumnDoc {
        name: "Fe",
        lines: ["feerate", "base", "(sats/vbyte)"],
    },
    ColumnDoc {
        name: "Ex",
        lines: ["feerate", "exponent", ""],
    },
    ColumnDoc {
        name: "Pr",
        lines: ["prob", "TT put", "onchain"],
    },
    ColumnDoc {
        name: "Le",
        lines: ["leaves", "across all TTs", ""],
    },
    ColumnDoc {
        name: "Va",
        lines: ["value of all", "leaves put together", "(BTC)"],
    },
    ColumnDoc {
        name: "Co",
        lines: ["cost of", "capital", ""],
    },
    // Security delay
    ColumnDoc {
        name: "FractionTTLeaves",
        lines: ["fraction of block", "space devoted to", "leaves"],
    },
    ColumnDoc {
        name: "SecurityDelayBlocks",
        lines: ["delay for putting", "leaves onchain", "(blocks)"],
    },
    ColumnDoc {
        name: "SecurityDelayYears",
        lines: ["delay for putting", "leaves onchain", "(years)"],
    },
    ColumnDoc {
        name: "CapitalCost",
        lines: ["capital cost", "per leaf", "(sats)"],
    },
    ColumnDoc {
        name: "CapitalEfficiency",
        lines: ["fraction of funder's", "funds used by", "casual user"],
    },
    ColumnDoc {
        name: "OnchainFee",
        lines: ["max fee", "per onchain leaf", "(sats)"],
    },
    ColumnDoc {
        name: "OnchainFeeFraction",
        lines: [
            "max fee per",
            "onchain leaf as fraction",
            "of casual user's funds",
        ],
    },
    ColumnDoc {
        name: "ExpectedOnchainFee",
        lines: ["expected fee per", "leaf", "(sats)"],
    },
    ColumnDoc {
        name: "ExpectedOverheadFraction",
        lines: [
            "capital cost plus",
            "expected fee per leaf as",
            "fraction of casual user's funds",
        ],
    },
    // Scalability sweep
    ColumnDoc {
        name: "Depth",
        lines: ["tree", "depth", "(levels)"],
    },
    ColumnDoc {
        name: "Branching",
        lines: ["branching", "factor", ""],
    },
    ColumnDoc {
        name: "LeafCount",
        lines: ["leaves", "per tree", ""],
    },
    ColumnDoc {
        name: "InternalNodes",
        lines: ["internal", "nodes", ""],
    },
    ColumnDoc {
        name: "LockupBlocks",
        lines: ["capital", "lock-up", "(blocks)"],
    },
    ColumnDoc {
        name: "AnnualizedCapitalCost",
        lines: ["annual", "capital cost", "(sats)"],
    },
    ColumnDoc {
        name: "UnwindTransactions",
        lines: ["txs to", "unwind tree", ""],
    },
    ColumnDoc {
        name: "OnchainUnwindCost",
        lines: ["unwind", "fee", "(sats)"],
    },
    ColumnDoc {
        name: "ExitPathTransactions",
        lines: ["txs on one", "leaf exit path", ""],
    },
    ColumnDoc {
        name: "ScalingFactor",
        lines: ["leaves per", "exit-path tx", ""],
    },
    ColumnDoc {
        name: "Viable",
        lines: ["capital cost", "within", "unwind fee"],
    },
    ColumnDoc {
        name: "Breakeven",
        lines: ["largest", "viable", "shape"],
    },
    ColumnDoc {
        name: "FlipDepth",
        lines: ["first non-viable", "depth", ""],
    },
    ColumnDoc {
        name: "FlipBranching",
        lines: ["first non-viable", "branching", ""],
    },
    ColumnDoc {
        name: "FlipLeafCount",
        lines: ["first non-viable", "leaves", ""],
    },
];

/// Description rows for a column; unknown columns get blanks
fn describe(name: &str) -> [&'static str; 3] {
    COLUMN_DOCS
        .iter()
        .find(|d| d.name == name)
        .map(|d| d.lines)
        .unwrap_or(["", "", ""])
}

/// Builder for a sectioned table rendered into a string
pub struct SectionedTable {
    writer: Writer<Vec<u8>>,
    annotated: bool,
}

impl SectionedTable {
    pub fn new(annotated: bool) -> Self {
        Self {
            writer: WriterBuilder::new().flexible(true).from_writer(Vec::new()),
            annotated,
        }
    }

    /// Title row followed by a blank row; annotated tables only
    pub fn title(&mut self, title: &str) -> AppResult<()> {
        if self.annotated {
            self.writer.write_record([title])?;
            self.blank()?;
        }
        Ok(())
    }

    /// Header row, plus description rows when annotated
    pub fn header<I, S>(&mut self, names: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.writer.write_record(&names)?;
        if self.annotated {
            let docs: Vec<[&str; 3]> = names.iter().map(|n| describe(n)).collect();
            for level in 0..3 {
                self.writer.write_record(docs.iter().map(|d| d[level]))?;
            }
        }
        Ok(())
    }

    pub fn row<I, S>(&mut self, cells: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(cells)?;
        Ok(())
    }

    /// A separator row holding a single empty cell
    pub fn blank(&mut self) -> AppResult<()> {
        self.writer.write_record([""])?;
        Ok(())
    }

    /// Echo the input's fixed section followed by a separator
    pub fn fixed_section(&mut self, section: &RawSection) -> AppResult<()> {
        self.header(&section.headers)?;
        self.row(&section.values)?;
        self.blank()
    }

    pub fn finish(self) -> AppResult<String> {
        let bytes = self
            .writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
