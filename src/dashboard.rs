use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::api::{BalanceStore, PaymentsApi};
use crate::error::{DashboardError, Resource};
use crate::lifecycle::MountFlag;
use crate::models::{FinancialSummary, UpcomingPayment};
use crate::notify::Notifier;

const MARKED_PAID: &str = "Payment marked as paid";

/// Local view state owned by the synchronizer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub summary: FinancialSummary,
    pub payments: Vec<UpcomingPayment>,
    /// Ids whose mark-paid request is still in flight.
    pub pending: BTreeSet<String>,
    /// Set once a `sync()` has applied both results; content waits on it.
    pub synced: bool,
}

impl DashboardSnapshot {
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub summary_loaded: bool,
    pub payments_loaded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPaidOutcome {
    Removed,
    Failed,
    /// A request for this id was already outstanding; nothing was sent.
    AlreadyInFlight,
    /// The view was torn down before the server answered.
    Discarded,
}

/// Holds the summary snapshot and payment list for an authenticated
/// viewer. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DashboardSynchronizer {
    state: Rc<RefCell<DashboardSnapshot>>,
    balance: Rc<dyn BalanceStore>,
    payments: Rc<dyn PaymentsApi>,
    notifier: Rc<dyn Notifier>,
    mount: MountFlag,
    on_change: Rc<dyn Fn()>,
}

impl DashboardSynchronizer {
    pub fn new(
        balance: Rc<dyn BalanceStore>,
        payments: Rc<dyn PaymentsApi>,
        notifier: Rc<dyn Notifier>,
        mount: MountFlag,
        on_change: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(DashboardSnapshot::default())),
            balance,
            payments,
            notifier,
            mount,
            on_change,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.borrow().clone()
    }

    /// Fetches the summary and the payment list concurrently. Each result
    /// is applied on its own: a failure keeps that part's previous data and
    /// raises an error notification without blocking the other.
    pub async fn sync(&self) -> Option<SyncOutcome> {
        let (summary, payments) = futures::join!(
            self.balance.fetch_transaction_stats(),
            self.payments.list_payments()
        );
        if !self.mount.is_mounted() {
            log::info!("Dashboard sync finished after teardown; results dropped");
            return None;
        }

        let summary_loaded = match summary {
            Ok(()) => {
                self.state.borrow_mut().summary = self.balance.snapshot();
                true
            }
            Err(source) => {
                self.report(DashboardError::DataFetchFailure {
                    resource: Resource::Summary,
                    source,
                });
                false
            }
        };

        let payments_loaded = match payments {
            Ok(list) => {
                log::info!("Upcoming payments loaded: {}", list.len());
                self.state.borrow_mut().payments = list;
                true
            }
            Err(source) => {
                self.report(DashboardError::DataFetchFailure {
                    resource: Resource::Payments,
                    source,
                });
                false
            }
        };

        self.state.borrow_mut().synced = true;
        (self.on_change)();
        Some(SyncOutcome {
            summary_loaded,
            payments_loaded,
        })
    }

    /// Re-reads the balance store, e.g. after a transaction was recorded.
    pub async fn refresh_summary(&self) -> bool {
        let result = self.balance.fetch_transaction_stats().await;
        if !self.mount.is_mounted() {
            return false;
        }
        match result {
            Ok(()) => {
                self.state.borrow_mut().summary = self.balance.snapshot();
                (self.on_change)();
                true
            }
            Err(source) => {
                self.report(DashboardError::DataFetchFailure {
                    resource: Resource::Summary,
                    source,
                });
                false
            }
        }
    }

    /// Deletes the payment server-side and drops it locally only once the
    /// server confirms. The id is locked while the request is in flight.
    pub async fn mark_paid(&self, id: &str) -> MarkPaidOutcome {
        if !self.state.borrow_mut().pending.insert(id.to_string()) {
            log::warn!("Mark-paid for {} already in flight; ignoring", id);
            return MarkPaidOutcome::AlreadyInFlight;
        }
        (self.on_change)();

        let result = self.payments.delete_payment(id).await;
        if !self.mount.is_mounted() {
            return MarkPaidOutcome::Discarded;
        }

        let outcome = match result {
            Ok(()) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.pending.remove(id);
                    if let Some(index) = state.payments.iter().position(|p| p.id == id) {
                        state.payments.remove(index);
                    }
                }
                self.notifier.success(MARKED_PAID);
                MarkPaidOutcome::Removed
            }
            Err(source) => {
                self.state.borrow_mut().pending.remove(id);
                self.report(DashboardError::MutationFailure {
                    id: id.to_string(),
                    source,
                });
                MarkPaidOutcome::Failed
            }
        };
        (self.on_change)();
        outcome
    }

    /// Appends a payment the server has just created.
    pub fn add_payment(&self, payment: UpcomingPayment) {
        self.state.borrow_mut().payments.push(payment);
        (self.on_change)();
    }

    fn report(&self, error: DashboardError) {
        error.log();
        if let Some(message) = error.user_message() {
            self.notifier.error(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::NewPayment;
    use crate::notify::testing::RecordingNotifier;
    use crate::notify::ToastLevel;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    fn rent() -> UpcomingPayment {
        UpcomingPayment {
            id: "p1".into(),
            title: "Rent".into(),
            amount: 1_500_000,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
        }
    }

    fn internet() -> UpcomingPayment {
        UpcomingPayment {
            id: "p2".into(),
            title: "Internet".into(),
            amount: 350_000,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 10).expect("date"),
        }
    }

    struct FakeBalance {
        result: RefCell<Result<(), ApiError>>,
        summary: FinancialSummary,
    }

    impl FakeBalance {
        fn ok(income: i64, expenses: i64) -> Self {
            Self {
                result: RefCell::new(Ok(())),
                summary: FinancialSummary {
                    income,
                    expenses,
                    monthly_stats: Vec::new(),
                },
            }
        }

        fn failing() -> Self {
            Self {
                result: RefCell::new(Err(ApiError::Network("offline".into()))),
                summary: FinancialSummary::default(),
            }
        }
    }

    #[async_trait(?Send)]
    impl BalanceStore for FakeBalance {
        fn snapshot(&self) -> FinancialSummary {
            self.summary.clone()
        }

        async fn fetch_transaction_stats(&self) -> Result<(), ApiError> {
            self.result.borrow().clone()
        }
    }

    #[derive(Default)]
    struct FakePayments {
        list: RefCell<Option<Result<Vec<UpcomingPayment>, ApiError>>>,
        delete_result: RefCell<Option<ApiError>>,
        deletes: RefCell<Vec<String>>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        list_gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl FakePayments {
        fn listing(list: Vec<UpcomingPayment>) -> Self {
            Self {
                list: RefCell::new(Some(Ok(list))),
                ..Self::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl PaymentsApi for FakePayments {
        async fn list_payments(&self) -> Result<Vec<UpcomingPayment>, ApiError> {
            let gate = self.list_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.list.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn delete_payment(&self, id: &str) -> Result<(), ApiError> {
            self.deletes.borrow_mut().push(id.to_string());
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match self.delete_result.borrow().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        async fn create_payment(&self, _: &NewPayment) -> Result<UpcomingPayment, ApiError> {
            Ok(rent())
        }
    }

    struct Fixture {
        sync: DashboardSynchronizer,
        payments: Rc<FakePayments>,
        notifier: Rc<RecordingNotifier>,
        mount: MountFlag,
        renders: Rc<Cell<u32>>,
    }

    fn fixture(balance: FakeBalance, payments: FakePayments) -> Fixture {
        let payments = Rc::new(payments);
        let notifier = Rc::new(RecordingNotifier::default());
        let mount = MountFlag::new();
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        let sync = DashboardSynchronizer::new(
            Rc::new(balance),
            payments.clone(),
            notifier.clone(),
            mount.clone(),
            Rc::new(move || counter.set(counter.get() + 1)),
        );
        Fixture {
            sync,
            payments,
            notifier,
            mount,
            renders,
        }
    }

    #[test]
    fn sync_loads_summary_and_payments() {
        let f = fixture(FakeBalance::ok(5_000_000, 2_000_000), FakePayments::listing(vec![rent()]));
        let outcome = block_on(f.sync.sync()).expect("mounted");

        assert!(outcome.summary_loaded && outcome.payments_loaded);
        let snapshot = f.sync.snapshot();
        assert!(snapshot.synced);
        assert_eq!(snapshot.summary.balance(), 3_000_000);
        assert_eq!(snapshot.payments, vec![rent()]);
        assert!(f.notifier.messages.borrow().is_empty());
    }

    #[test]
    fn summary_failure_does_not_block_payments() {
        let f = fixture(FakeBalance::failing(), FakePayments::listing(vec![rent()]));
        let outcome = block_on(f.sync.sync()).expect("mounted");

        assert!(!outcome.summary_loaded);
        assert!(outcome.payments_loaded);
        assert_eq!(f.sync.snapshot().payments, vec![rent()]);
        assert_eq!(
            *f.notifier.messages.borrow(),
            vec![(ToastLevel::Error, "Failed to load transaction data".to_string())]
        );
    }

    #[test]
    fn payments_failure_keeps_stale_list() {
        let f = fixture(FakeBalance::ok(100, 50), FakePayments::listing(vec![rent()]));
        block_on(f.sync.sync());

        *f.payments.list.borrow_mut() = Some(Err(ApiError::Network("offline".into())));
        let outcome = block_on(f.sync.sync()).expect("mounted");

        assert!(outcome.summary_loaded);
        assert!(!outcome.payments_loaded);
        assert_eq!(f.sync.snapshot().payments, vec![rent()]);
        assert_eq!(f.notifier.levels(), vec![ToastLevel::Error]);
    }

    #[test]
    fn mark_paid_success_removes_exactly_one() {
        let f = fixture(FakeBalance::ok(0, 0), FakePayments::listing(vec![rent()]));
        block_on(f.sync.sync());

        let outcome = block_on(f.sync.mark_paid("p1"));
        assert_eq!(outcome, MarkPaidOutcome::Removed);
        assert!(f.sync.snapshot().payments.is_empty());
        assert_eq!(
            *f.notifier.messages.borrow(),
            vec![(ToastLevel::Success, "Payment marked as paid".to_string())]
        );
    }

    #[test]
    fn mark_paid_leaves_other_entries() {
        let f = fixture(
            FakeBalance::ok(0, 0),
            FakePayments::listing(vec![rent(), internet()]),
        );
        block_on(f.sync.sync());

        block_on(f.sync.mark_paid("p2"));
        assert_eq!(f.sync.snapshot().payments, vec![rent()]);
    }

    #[test]
    fn mark_paid_failure_keeps_entry() {
        let f = fixture(FakeBalance::ok(0, 0), FakePayments::listing(vec![rent()]));
        block_on(f.sync.sync());
        *f.payments.delete_result.borrow_mut() = Some(ApiError::Http {
            status: 500,
            message: "boom".into(),
        });

        let outcome = block_on(f.sync.mark_paid("p1"));
        assert_eq!(outcome, MarkPaidOutcome::Failed);
        let snapshot = f.sync.snapshot();
        assert_eq!(snapshot.payments, vec![rent()]);
        assert!(!snapshot.is_pending("p1"));
        assert_eq!(
            *f.notifier.messages.borrow(),
            vec![(ToastLevel::Error, "Failed to update payment status".to_string())]
        );
    }

    #[test]
    fn mark_paid_does_not_resync() {
        let f = fixture(FakeBalance::ok(0, 0), FakePayments::listing(vec![rent(), internet()]));
        block_on(f.sync.sync());
        // Server would now report nothing; local removal must not refetch.
        *f.payments.list.borrow_mut() = Some(Ok(Vec::new()));

        block_on(f.sync.mark_paid("p1"));
        assert_eq!(f.sync.snapshot().payments, vec![internet()]);
    }

    #[test]
    fn double_submit_sends_one_request() {
        let f = fixture(FakeBalance::ok(0, 0), FakePayments::listing(vec![rent()]));
        block_on(f.sync.sync());

        let (release, gate) = oneshot::channel();
        *f.payments.gate.borrow_mut() = Some(gate);

        let mut pool = LocalPool::new();
        let first = f.sync.clone();
        let result = Rc::new(Cell::new(None));
        let slot = result.clone();
        pool.spawner()
            .spawn_local(async move {
                slot.set(Some(first.mark_paid("p1").await));
            })
            .expect("spawn");
        pool.run_until_stalled();

        assert!(f.sync.snapshot().is_pending("p1"));
        assert_eq!(
            block_on(f.sync.mark_paid("p1")),
            MarkPaidOutcome::AlreadyInFlight
        );

        release.send(()).expect("receiver alive");
        pool.run();

        assert_eq!(result.get(), Some(MarkPaidOutcome::Removed));
        assert_eq!(*f.payments.deletes.borrow(), vec!["p1".to_string()]);
        assert!(f.sync.snapshot().payments.is_empty());
    }

    #[test]
    fn results_after_teardown_are_ignored() {
        let f = fixture(FakeBalance::ok(0, 0), FakePayments::listing(vec![rent()]));
        block_on(f.sync.sync());

        let (release, gate) = oneshot::channel();
        *f.payments.gate.borrow_mut() = Some(gate);

        let mut pool = LocalPool::new();
        let task = f.sync.clone();
        let result = Rc::new(Cell::new(None));
        let slot = result.clone();
        pool.spawner()
            .spawn_local(async move {
                slot.set(Some(task.mark_paid("p1").await));
            })
            .expect("spawn");
        pool.run_until_stalled();

        f.mount.unmount();
        let renders_before = f.renders.get();
        release.send(()).expect("receiver alive");
        pool.run();

        assert_eq!(result.get(), Some(MarkPaidOutcome::Discarded));
        assert_eq!(f.sync.snapshot().payments, vec![rent()]);
        assert_eq!(f.renders.get(), renders_before);
        assert!(f.notifier.messages.borrow().is_empty());
        assert!(block_on(f.sync.sync()).is_none());
    }

    #[test]
    fn snapshot_is_not_synced_while_a_fetch_is_outstanding() {
        let f = fixture(FakeBalance::ok(100, 40), FakePayments::listing(vec![rent()]));
        let (release, gate) = oneshot::channel();
        *f.payments.list_gate.borrow_mut() = Some(gate);

        let mut pool = LocalPool::new();
        let task = f.sync.clone();
        pool.spawner()
            .spawn_local(async move {
                task.sync().await;
            })
            .expect("spawn");
        pool.run_until_stalled();

        let mid = f.sync.snapshot();
        assert!(!mid.synced);
        assert!(mid.payments.is_empty());
        assert_eq!(f.renders.get(), 0);

        release.send(()).expect("receiver alive");
        pool.run();

        let done = f.sync.snapshot();
        assert!(done.synced);
        assert_eq!(done.payments, vec![rent()]);
        assert_eq!(done.summary.balance(), 60);
    }

    #[test]
    fn added_payment_is_appended() {
        let f = fixture(FakeBalance::ok(0, 0), FakePayments::listing(vec![rent()]));
        block_on(f.sync.sync());
        f.sync.add_payment(internet());
        assert_eq!(f.sync.snapshot().payments, vec![rent(), internet()]);
    }

    #[test]
    fn refresh_summary_updates_snapshot() {
        let f = fixture(FakeBalance::ok(700, 200), FakePayments::default());
        assert!(block_on(f.sync.refresh_summary()));
        assert_eq!(f.sync.snapshot().summary.balance(), 500);
    }
}
