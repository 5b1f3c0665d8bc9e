//! End-to-end tests for search over a live log table.

mod common;

use std::rc::Rc;

use common::{
    Event, FakePromptView, FakeSearchableView, FakeStatus, Journal, PromptCall, run_local, settle,
};
use logsift::logtable::{LogTable, RowId};
use logsift::search::{SearchPromptView, SearchResultsHighlighter, SessionState};
use logsift::{LogSearchPresenter, LogSearchViews, SearchConfig, log_search};
use logsift_search::{Field, LogRecord};

struct Harness {
    table: Rc<LogTable>,
    presenter: LogSearchPresenter,
    highlighter: Rc<SearchResultsHighlighter>,
    view: Rc<FakeSearchableView<RowId>>,
    prompt: Rc<FakePromptView>,
    journal: Rc<Journal<RowId>>,
}

impl Harness {
    fn new(records: Vec<LogRecord>) -> Self {
        let table = Rc::new(LogTable::from_records(records));
        let journal = Rc::new(Journal::default());
        let view = Rc::new(FakeSearchableView::new(journal.clone()));
        let prompt = Rc::new(FakePromptView::default());

        let (presenter, highlighter) = log_search(
            table.clone(),
            &SearchConfig::default(),
            LogSearchViews {
                table_view: view.clone(),
                status: Rc::new(FakeStatus::new(journal.clone())),
                prompt: prompt.clone(),
            },
        );
        Self {
            table,
            presenter,
            highlighter,
            view,
            prompt,
            journal,
        }
    }

    async fn search(&self, query: &str) -> Vec<Event<RowId>> {
        self.presenter.show_search_prompt();
        self.presenter.commit(query);
        settle().await;
        self.journal.take()
    }

    async fn next(&self) -> Vec<Event<RowId>> {
        self.presenter.find_next();
        settle().await;
        self.journal.take()
    }

    async fn prev(&self) -> Vec<Event<RowId>> {
        self.presenter.find_prev();
        settle().await;
        self.journal.take()
    }
}

fn row(index: usize) -> RowId {
    RowId::new(index)
}

fn records() -> Vec<LogRecord> {
    vec![
        LogRecord::for_message("Start proc com.android.contacts")
            .with_tag("ActivityManager")
            .with_app_name("system_server"),
        LogRecord::for_message("Contacts loaded")
            .with_tag("ContactsProvider")
            .with_app_name("com.android.providers.contacts"),
        LogRecord::for_message("Displayed com.android.dialer")
            .with_tag("ActivityManager")
            .with_app_name("system_server"),
        LogRecord::for_message("GC freed 1024 objects")
            .with_tag("art")
            .with_app_name("com.android.contacts"),
    ]
}

#[tokio::test]
async fn test_finds_rows_through_the_presenter() {
    run_local(async {
        let h = Harness::new(records());

        assert_eq!(h.search("contacts").await, vec![Event::Found(row(0))]);
        assert_eq!(h.next().await, vec![Event::Found(row(1))]);
        assert_eq!(h.next().await, vec![Event::Found(row(3))]);
        assert_eq!(h.next().await, vec![Event::NotFound]);
        assert_eq!(h.prev().await, vec![Event::Found(row(1))]);
    })
    .await;
}

#[tokio::test]
async fn test_qualified_queries_search_one_column() {
    run_local(async {
        let h = Harness::new(records());

        assert_eq!(h.search("tag:activity").await, vec![Event::Found(row(0))]);
        assert_eq!(h.next().await, vec![Event::Found(row(2))]);
        assert_eq!(h.next().await, vec![Event::NotFound]);

        h.view.select(row(0));
        assert_eq!(h.search("app: /^com\\./").await, vec![Event::Found(row(1))]);
        assert_eq!(h.next().await, vec![Event::Found(row(3))]);
    })
    .await;
}

#[tokio::test]
async fn test_search_position_survives_resorting() {
    run_local(async {
        let h = Harness::new(records());

        assert_eq!(h.search("activitymanager").await, vec![Event::Found(row(0))]);

        // Reverse arrival order: row 2 is now above row 0.
        h.table.sort_by({
            let order: Vec<String> = records().iter().map(|r| r.message().to_string()).collect();
            move |a, b| {
                let ia = order.iter().position(|m| m == a.message());
                let ib = order.iter().position(|m| m == b.message());
                ib.cmp(&ia)
            }
        });
        assert_eq!(h.table.view_index_of(row(0)), Some(3));

        assert_eq!(h.prev().await, vec![Event::Found(row(2))]);
        assert_eq!(h.prev().await, vec![Event::NotFound]);
    })
    .await;
}

#[tokio::test]
async fn test_filtered_out_start_row_searches_from_the_top() {
    run_local(async {
        let h = Harness::new(records());

        h.view.select(row(2));
        h.table.set_filter(|r| r.tag() != "ActivityManager");

        assert_eq!(h.search("android").await, vec![Event::Found(row(1))]);
        assert_eq!(h.next().await, vec![Event::Found(row(3))]);
    })
    .await;
}

#[tokio::test]
async fn test_appended_rows_are_searched() {
    run_local(async {
        let h = Harness::new(records());

        assert_eq!(h.search("dialer").await, vec![Event::Found(row(2))]);
        assert_eq!(h.next().await, vec![Event::NotFound]);

        h.table.append([LogRecord::for_message("Stopped com.android.dialer")]);
        assert_eq!(h.next().await, vec![Event::Found(row(4))]);
    })
    .await;
}

#[tokio::test]
async fn test_only_the_latest_query_reports_results() {
    run_local(async {
        let h = Harness::new(records());

        h.presenter.show_search_prompt();
        h.presenter.commit("contacts");
        h.presenter.show_search_prompt();
        h.presenter.commit("dialer");
        settle().await;

        assert_eq!(h.journal.take(), vec![Event::Found(row(2))]);
    })
    .await;
}

#[tokio::test]
async fn test_highlighter_follows_the_session() {
    run_local(async {
        let h = Harness::new(records());
        let record = h.table.row(row(1)).unwrap();

        assert!(h.highlighter.highlight_spans(&record, Field::Tag).is_empty());

        h.search("contacts").await;
        assert_eq!(h.highlighter.highlight_spans(&record, Field::Tag), vec![0..8]);
        assert_eq!(
            h.highlighter.highlight_spans(&record, Field::AppName),
            vec![22..30]
        );

        h.search("msg:contacts").await;
        assert!(h.highlighter.highlight_spans(&record, Field::Tag).is_empty());
        assert_eq!(
            h.highlighter.highlight_spans(&record, Field::Message),
            vec![0..8]
        );

        h.presenter.stop_search();
        assert!(h.highlighter.strategy().is_none());
        assert_eq!(h.presenter.state(), SessionState::Idle);
    })
    .await;
}

#[tokio::test]
async fn test_invalid_regex_reports_position_in_query() {
    run_local(async {
        let h = Harness::new(records());

        h.presenter.show_search_prompt();
        h.prompt.take_calls();
        h.presenter.commit("/foo(/");

        let calls = h.prompt.take_calls();
        let [PromptCall::Error(message)] = calls.as_slice() else {
            panic!("expected a single error, got {calls:?}");
        };
        assert!(message.starts_with("'/foo(/' isn't a valid search expression. "));
        assert!(message.ends_with(" at position 4"));
        assert!(h.prompt.is_showing());
        assert!(h.highlighter.strategy().is_none());
    })
    .await;
}

#[tokio::test]
async fn test_blank_query_clears_search_and_highlights() {
    run_local(async {
        let h = Harness::new(records());

        h.search("art").await;
        assert!(h.highlighter.strategy().is_some());

        assert!(h.search("  ").await.is_empty());
        assert!(h.highlighter.strategy().is_none());
        assert_eq!(h.presenter.state(), SessionState::Idle);

        // Without a search, find opens the prompt again.
        h.prompt.take_calls();
        h.presenter.find_next();
        assert_eq!(h.prompt.take_calls(), vec![PromptCall::Show]);
    })
    .await;
}
