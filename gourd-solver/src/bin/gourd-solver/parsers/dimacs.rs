//! A parser for the DIMACS CNF file format. Given that DIMACS files can be very large, the
//! implementation is designed to read the file in chunks. The parser also will not allocate for
//! every encountered clause, but rather re-use its buffers.
//!
//! The parser operates on a type that implements the [`DimacsSink`] trait, which serves as an
//! interface to the consumer of the parsed contents of the file.
//!
//! It should be noted that the parser should not be used as a DIMACS validator. Even though it
//! should only accept valid DIMACS files, the errors are not extremely detailed. Literals which
//! exceed the number of variables in the header are only detected by the sink.
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::num::NonZeroI32;
use std::str::FromStr;

use gourd_core::options::SolverOptions;
use gourd_core::InputError;
use gourd_core::Solver;
use thiserror::Error;

/// A dimacs sink stores a set of clauses over a fixed number of variables.
pub(crate) trait DimacsSink {
    /// The arguments to the dimacs sink.
    type ConstructorArgs;

    /// The underlying formula type.
    type Formula;

    /// Create an empty formula.
    fn empty(args: Self::ConstructorArgs, num_variables: usize) -> Self;

    /// Add a new clause to the formula.
    fn add_clause(&mut self, clause: &[NonZeroI32]) -> Result<(), InputError>;

    /// Take the collected clauses and turn it into the underlying formula type.
    fn into_formula(self) -> Self::Formula;
}

#[derive(Debug, Error)]
pub(crate) enum DimacsParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("missing dimacs header")]
    MissingHeader,

    #[error("'{0}' is an invalid header")]
    InvalidHeader(String),

    #[error("multiple dimacs headers found")]
    DuplicateHeader,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("'{0}' is an invalid DIMACS literal")]
    InvalidLiteral(String),

    #[error("the last clause in the source is not terminated with a '0'")]
    UnterminatedClause,

    #[error("expected to parse {expected} clauses, but parsed {parsed}")]
    IncorrectClauseCount { expected: usize, parsed: usize },

    #[error("{0}")]
    InvalidClause(#[from] InputError),
}

pub(crate) fn parse_cnf<Sink: DimacsSink>(
    source: impl Read,
    sink_constructor_args: Sink::ConstructorArgs,
) -> Result<Sink::Formula, DimacsParseError> {
    let mut reader = BufReader::new(source);
    let mut parser = DimacsParser::<Sink>::new(sink_constructor_args);

    loop {
        let num_bytes = {
            let data = reader.fill_buf()?;

            if data.is_empty() {
                return parser.complete();
            }

            parser.parse_chunk(data)?;
            data.len()
        };

        reader.consume(num_bytes);
    }
}

/// The core DIMACS parser, which feeds every completely parsed clause to the sink.
struct DimacsParser<Sink: DimacsSink> {
    sink_constructor_args: Option<Sink::ConstructorArgs>,
    sink: Option<Sink>,
    header: Option<CnfHeader>,
    buffer: String,
    clause: Vec<NonZeroI32>,
    state: ParseState,
    parsed_clauses: usize,
}

enum ParseState {
    StartLine,
    Header,
    Comment,
    Literal,
    NegativeLiteral,
    Clause,
}

impl<Sink: DimacsSink> DimacsParser<Sink> {
    fn new(sink_constructor_args: Sink::ConstructorArgs) -> Self {
        DimacsParser {
            sink_constructor_args: Some(sink_constructor_args),
            sink: None,
            header: None,
            buffer: String::new(),
            clause: vec![],
            state: ParseState::StartLine,
            parsed_clauses: 0,
        }
    }

    /// Parse the next chunk of bytes. This may start in the middle of parsing a clause or file
    /// header, and may end in such a state as well.
    fn parse_chunk(&mut self, chunk: &[u8]) -> Result<(), DimacsParseError> {
        for byte in chunk {
            match self.state {
                ParseState::StartLine => match byte {
                    b if b.is_ascii_whitespace() => {} // Continue consuming whitespace.

                    b'p' => {
                        self.state = ParseState::Header;
                        self.buffer.clear();
                        self.buffer.push('p');
                    }

                    b'c' => {
                        self.state = ParseState::Comment;
                    }

                    b @ b'1'..=b'9' => {
                        self.start_literal(b, true);
                    }

                    // An empty clause, or the end of a clause which spans multiple lines.
                    b'0' => self.finish_clause()?,

                    b'-' => self.start_literal(&b'-', false),

                    b => return Err(DimacsParseError::UnexpectedCharacter(*b as char)),
                },

                ParseState::Header => match byte {
                    b'\n' => {
                        self.init_formula()?;
                        self.state = ParseState::StartLine;
                    }

                    b => self.buffer.push(*b as char),
                },

                ParseState::Comment => {
                    if *byte == b'\n' {
                        self.state = ParseState::StartLine;
                    }
                }

                ParseState::Literal => match byte {
                    b if b.is_ascii_whitespace() => {
                        self.finish_literal()?;
                        if *b == b'\n' {
                            self.state = ParseState::StartLine;
                        }
                    }

                    b @ b'0'..=b'9' => self.buffer.push(*b as char),

                    b => return Err(DimacsParseError::UnexpectedCharacter(*b as char)),
                },

                ParseState::NegativeLiteral => match byte {
                    b @ b'1'..=b'9' => {
                        self.buffer.push(*b as char);
                        self.state = ParseState::Literal;
                    }

                    b => return Err(DimacsParseError::UnexpectedCharacter(*b as char)),
                },

                ParseState::Clause => match byte {
                    b'0' => self.finish_clause()?,

                    // A new-line does not terminate the clause. The literals parsed so far are
                    // kept, and the StartLine state handles comments and leading whitespace.
                    b'\n' => self.state = ParseState::StartLine,
                    b if b.is_ascii_whitespace() => {} // Ignore whitespace.

                    b @ b'1'..=b'9' => self.start_literal(b, true),
                    b'-' => self.start_literal(&b'-', false),

                    b => return Err(DimacsParseError::UnexpectedCharacter(*b as char)),
                },
            }
        }

        Ok(())
    }

    fn start_literal(&mut self, b: &u8, is_positive: bool) {
        self.state = if is_positive {
            ParseState::Literal
        } else {
            ParseState::NegativeLiteral
        };

        self.buffer.clear();
        self.buffer.push(*b as char);
    }

    fn complete(mut self) -> Result<Sink::Formula, DimacsParseError> {
        // A literal directly at the end of the source is not yet terminated by whitespace.
        if matches!(self.state, ParseState::Literal) {
            self.finish_literal()?;
        }

        let (Some(sink), Some(header)) = (self.sink, self.header) else {
            return Err(DimacsParseError::MissingHeader);
        };

        if !self.clause.is_empty() {
            Err(DimacsParseError::UnterminatedClause)
        } else if header.num_clauses != self.parsed_clauses {
            Err(DimacsParseError::IncorrectClauseCount {
                expected: header.num_clauses,
                parsed: self.parsed_clauses,
            })
        } else {
            Ok(sink.into_formula())
        }
    }

    fn init_formula(&mut self) -> Result<(), DimacsParseError> {
        let header = self.buffer.trim().parse::<CnfHeader>()?;

        self.sink = Some(Sink::empty(
            self.sink_constructor_args
                .take()
                .ok_or(DimacsParseError::DuplicateHeader)?,
            header.num_variables,
        ));

        self.header = Some(header);

        Ok(())
    }

    fn finish_literal(&mut self) -> Result<(), DimacsParseError> {
        let literal = self
            .buffer
            .parse::<i32>()
            .ok()
            .and_then(NonZeroI32::new)
            .ok_or_else(|| DimacsParseError::InvalidLiteral(self.buffer.clone()))?;

        self.clause.push(literal);
        self.state = ParseState::Clause;

        Ok(())
    }

    fn finish_clause(&mut self) -> Result<(), DimacsParseError> {
        let sink = self.sink.as_mut().ok_or(DimacsParseError::MissingHeader)?;

        self.parsed_clauses += 1;
        sink.add_clause(&self.clause)?;
        self.clause.clear();

        Ok(())
    }
}

struct CnfHeader {
    num_variables: usize,
    num_clauses: usize,
}

impl FromStr for CnfHeader {
    type Err = DimacsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with("p cnf ") {
            return Err(DimacsParseError::InvalidHeader(s.to_owned()));
        }

        let mut components = s.split_whitespace().skip(2);

        let num_variables = next_header_component::<usize>(&mut components, s)?;
        let num_clauses = next_header_component::<usize>(&mut components, s)?;

        if components.next().is_some() {
            return Err(DimacsParseError::InvalidHeader(s.to_owned()));
        }

        Ok(Self {
            num_variables,
            num_clauses,
        })
    }
}

fn next_header_component<'a, Num: FromStr>(
    components: &mut impl Iterator<Item = &'a str>,
    header: &str,
) -> Result<Num, DimacsParseError> {
    components
        .next()
        .ok_or_else(|| DimacsParseError::InvalidHeader(header.to_owned()))?
        .parse::<Num>()
        .map_err(|_| DimacsParseError::InvalidHeader(header.to_owned()))
}

/// A dimacs sink that creates a fresh [`Solver`] when reading DIMACS files.
#[derive(Debug)]
pub(crate) struct SolverDimacsSink {
    solver: Solver,
    buffer: Vec<i32>,
}

impl DimacsSink for SolverDimacsSink {
    type ConstructorArgs = SolverOptions;
    type Formula = Solver;

    fn empty(solver_options: Self::ConstructorArgs, num_variables: usize) -> Self {
        SolverDimacsSink {
            solver: Solver::with_options(num_variables, solver_options),
            buffer: Vec::new(),
        }
    }

    fn add_clause(&mut self, clause: &[NonZeroI32]) -> Result<(), InputError> {
        self.buffer.clear();
        self.buffer.extend(clause.iter().map(|literal| literal.get()));

        self.solver.add_clause(&self.buffer)
    }

    fn into_formula(self) -> Self::Formula {
        self.solver
    }
}

/// The clauses of a DIMACS file as they appear in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DimacsFormula {
    pub(crate) num_variables: usize,
    pub(crate) clauses: Vec<Vec<i32>>,
}

impl DimacsSink for DimacsFormula {
    type ConstructorArgs = ();
    type Formula = DimacsFormula;

    fn empty(_: Self::ConstructorArgs, num_variables: usize) -> Self {
        DimacsFormula {
            num_variables,
            clauses: vec![],
        }
    }

    fn add_clause(&mut self, clause: &[NonZeroI32]) -> Result<(), InputError> {
        self.clauses
            .push(clause.iter().map(|literal| literal.get()).collect());
        Ok(())
    }

    fn into_formula(self) -> Self::Formula {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_instance_is_read() {
        let source = "p cnf 2 2\n1 -2 0\n-1 2 0";
        let formula = parse_cnf_source(source);

        assert_eq!(2, formula.num_variables);
        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula.clauses);
    }

    #[test]
    fn instance_with_two_character_codes_is_accepted() {
        let source = "p cnf 11 2\n1 -2 10 0\n-1 2 -11 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2, 10], vec![-1, 2, -11]], formula.clauses);
    }

    #[test]
    fn comments_are_ignored() {
        let source = "c this is\nc a comment\np cnf 2 2\n1 -2 0\nc within the file\n-1 2 0\n";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula.clauses);
    }

    #[test]
    fn whitespace_and_empty_lines_are_ignored() {
        let source = r#"

            p cnf 2 2


             1 -2 0

            -1  2 0
        "#;

        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula.clauses);
    }

    #[test]
    fn clauses_on_same_line_are_separated() {
        let source = "p cnf 2 2\n1 -2 0 -1 2 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula.clauses);
    }

    #[test]
    fn new_lines_do_not_terminate_clause() {
        let source = "p cnf 2 2\n1\n-2 0 -1 2\n 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula.clauses);
    }

    #[test]
    fn empty_clause_is_read() {
        let source = "p cnf 1 2\n1 0\n0\n";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1], vec![]], formula.clauses);
    }

    #[test]
    fn negative_zero_is_an_unexpected_sequence() {
        let source = "p cnf 2 1\n1 -2 -0";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::UnexpectedCharacter('0')));
    }

    #[test]
    fn incomplete_clause_causes_error() {
        let source = "p cnf 2 1\n1 -2";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::UnterminatedClause));
    }

    #[test]
    fn incorrect_reported_clause_count() {
        let source = "p cnf 2 2\n1 -2 0";
        let err = get_cnf_parse_error(source);

        assert!(matches!(
            err,
            DimacsParseError::IncorrectClauseCount {
                expected: 2,
                parsed: 1
            }
        ));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        assert!(matches!(
            get_cnf_parse_error("1 2 0\n"),
            DimacsParseError::MissingHeader
        ));
        assert!(matches!(
            get_cnf_parse_error("p cnf two 1\n1 0\n"),
            DimacsParseError::InvalidHeader(_)
        ));
        assert!(matches!(
            get_cnf_parse_error("p cnf 1 1\np cnf 1 1\n1 0\n"),
            DimacsParseError::DuplicateHeader
        ));
    }

    #[test]
    fn solver_sink_rejects_literals_beyond_the_header() {
        let source = "p cnf 2 1\n1 -3 0\n";
        let err = parse_cnf::<SolverDimacsSink>(source.as_bytes(), SolverOptions::default())
            .expect_err("variable 3 does not exist");

        assert!(matches!(
            err,
            DimacsParseError::InvalidClause(InputError::VariableOutOfRange {
                literal: -3,
                num_variables: 2,
                clause_index: 0
            })
        ));
    }

    #[test]
    fn solver_sink_builds_the_solver() {
        let source = "p cnf 3 2\n1 2 0\n-1 3 0\n";
        let solver = parse_cnf::<SolverDimacsSink>(source.as_bytes(), SolverOptions::default())
            .expect("valid dimacs");

        assert_eq!(3, solver.num_variables());
        assert_eq!(2, solver.num_clauses());
    }

    fn parse_cnf_source(source: &str) -> DimacsFormula {
        parse_cnf::<DimacsFormula>(source.as_bytes(), ()).expect("valid dimacs")
    }

    fn get_cnf_parse_error(source: &str) -> DimacsParseError {
        parse_cnf::<DimacsFormula>(source.as_bytes(), ()).expect_err("invalid dimacs")
    }
}
