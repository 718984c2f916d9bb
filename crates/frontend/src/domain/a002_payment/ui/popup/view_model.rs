use super::model;
use crate::domain::a002_payment::levels::{bank_sources, BANK_LEVELS};
use crate::shared::cascade::{CascadeController, CascadeSettings};
use contracts::domain::a002_payment::aggregate::PaymentReceipt;
use contracts::enums::PaymentMode;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PaymentPopupVm {
    pub application_no: StoredValue<String>,

    // === Fields ===
    pub mode: RwSignal<PaymentMode>,
    pub amount: RwSignal<Option<f64>>,
    pub reference_no: RwSignal<String>,
    pub bank: CascadeController,

    // === UI State ===
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl PaymentPopupVm {
    pub fn new(application_no: String, suggested_amount: Option<f64>) -> Self {
        Self {
            application_no: StoredValue::new(application_no),
            mode: RwSignal::new(PaymentMode::default()),
            amount: RwSignal::new(suggested_amount.filter(|a| *a > 0.0)),
            reference_no: RwSignal::new(String::new()),
            bank: CascadeController::new(BANK_LEVELS, bank_sources(), CascadeSettings::default()),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// The bank cascade is loaded lazily, on the first switch to a mode that needs it
    pub fn set_mode(&self, code: &str) {
        let Some(mode) = PaymentMode::from_code(code) else {
            return;
        };
        self.mode.set(mode);
        self.error.set(None);
        if mode.needs_bank() {
            self.bank.start();
        }
    }

    pub fn submit(&self, on_paid: Callback<PaymentReceipt>) {
        let payment = self.bank.with_untracked(|bank| {
            model::build_payment(
                self.mode.get_untracked(),
                self.amount.get_untracked(),
                &self.reference_no.get_untracked(),
                bank,
            )
        });
        let payment = match payment {
            Ok(p) => p,
            Err(e) => {
                self.error.set(Some(e.to_string()));
                return;
            }
        };

        let this = *self;
        let application_no = this.application_no.get_value();
        this.saving.set(true);
        this.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            let result = model::submit_payment(&application_no, &payment).await;
            this.saving.set(false);
            match result {
                Ok(receipt) => {
                    log::info!(
                        "payment {} recorded for {}",
                        receipt.receipt_id,
                        receipt.application_no
                    );
                    on_paid.run(receipt);
                }
                Err(e) => this.error.set(Some(e)),
            }
        });
    }
}
