//! Best-effort restore of the session from the store.
//!
//! Every record is read independently. A record that is missing, unreadable
//! or fails to decode falls back to its default and is logged; restoring
//! never fails.

use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::{Session, Settings};
use crate::{
    models::{Identity, MarketingInput, MarketingPlan},
    store::{Store, StoreExt, StoreKey},
};

pub(crate) async fn rehydrate(store: &dyn Store, settings: &Settings) -> Session {
    let user = load_or_default::<Option<Identity>>(store, StoreKey::Identity).await;
    let form = load_or_default::<MarketingInput>(store, StoreKey::FormMemo).await;
    let mut history = load_or_default::<Vec<MarketingPlan>>(store, StoreKey::History).await;
    let usage = load_or_default::<u32>(store, StoreKey::Usage).await;

    if history.len() > settings.history_cap {
        debug!(
            "Dropping {} history entries beyond the cap",
            history.len() - settings.history_cap
        );
        history.truncate(settings.history_cap);
    }

    debug!(
        "Restored session: user={}, history={}, usage={usage}",
        user.as_ref().map_or("-", |u: &Identity| u.username.as_str()),
        history.len()
    );

    Session {
        user,
        form,
        history,
        usage,
        ..Session::default()
    }
}

async fn load_or_default<T>(store: &dyn Store, key: StoreKey) -> T
where
    T: DeserializeOwned + Default + Send,
{
    match store.load_json::<T>(key).await {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Ignoring stored {key}: {e}");
            T::default()
        }
    }
}
