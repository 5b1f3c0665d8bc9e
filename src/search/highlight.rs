//! Highlighting of search hits in table cells.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use logsift_config::SearchConfig;
use logsift_search::{Field, LogRecord, RowSearchStrategy, StrategyObserver, TextHighlighter};

use super::tooltip::TooltipGenerator;

/// Tracks the active row strategy and highlights cells with it.
///
/// Register it with the search model as a [`StrategyObserver`]; it then
/// follows every started and finished search.
#[derive(Debug, Default)]
pub struct SearchResultsHighlighter {
    strategy: RefCell<Option<Rc<RowSearchStrategy>>>,
    config: SearchConfig,
}

impl SearchResultsHighlighter {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            strategy: RefCell::new(None),
            config,
        }
    }

    /// Strategy currently used for highlighting.
    pub fn strategy(&self) -> Option<Rc<RowSearchStrategy>> {
        self.strategy.borrow().clone()
    }

    /// Feed the hits in one cell to `highlighter`. No-op without an active
    /// search.
    pub fn highlight_cell(
        &self,
        record: &LogRecord,
        field: Field,
        highlighter: &mut dyn TextHighlighter,
    ) {
        if let Some(strategy) = self.strategy.borrow().as_ref() {
            strategy.highlight_column(record, field, highlighter);
        }
    }

    /// Byte ranges of the hits in one cell.
    pub fn highlight_spans(&self, record: &LogRecord, field: Field) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        self.highlight_cell(record, field, &mut spans);
        spans
    }

    /// Tooltip for a cell whose text does not fit into the column.
    ///
    /// Returns `None` when the text fits; the full value is then visible and
    /// needs no tooltip.
    pub fn cell_tooltip(&self, record: &LogRecord, field: Field, text_fits: bool) -> Option<String> {
        if text_fits {
            return None;
        }
        let mut generator = TooltipGenerator::from_config(field.value_of(record), &self.config);
        self.highlight_cell(record, field, &mut generator);
        Some(generator.tooltip())
    }
}

impl StrategyObserver<RowSearchStrategy> for SearchResultsHighlighter {
    fn on_new_search_strategy(&self, strategy: Rc<RowSearchStrategy>) {
        log::debug!("Highlighting {:?} hits", strategy.qualifier());
        *self.strategy.borrow_mut() = Some(strategy);
    }

    fn on_search_strategy_cleared(&self) {
        *self.strategy.borrow_mut() = None;
    }
}
