//! The decode facade: address parsing, tree building, populate and unmarshal.

use tracing::debug;

use regbind_schema::{build_root, Schema, Target};
use regbind_store::Store;
use regbind_types::Location;

use crate::config::DecoderConfig;
use crate::error::DecodeResult;
use crate::populate::populate;
use crate::unmarshal::unmarshal;

/// Decodes store locations into typed targets.
///
/// A decoder only borrows its store, so it can be shared across threads and
/// reused for any number of decodes.
#[derive(Debug)]
pub struct Decoder<'s, S: Store + ?Sized> {
    store: &'s S,
    config: DecoderConfig,
}

impl<'s, S: Store + ?Sized> Decoder<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self::with_config(store, DecoderConfig::default())
    }

    pub fn with_config(store: &'s S, config: DecoderConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the container at `address` (`//<root>/<path>`) into `target`.
    ///
    /// On error `target` is left exactly as it was.
    pub fn decode<T: Schema + Target>(&self, address: &str, target: &mut T) -> DecodeResult<()> {
        let location = Location::parse(address)?;
        self.decode_into(&location, target)
    }

    /// Decode an already parsed location into `target`.
    pub fn decode_into<T: Schema + Target>(
        &self,
        location: &Location,
        target: &mut T,
    ) -> DecodeResult<()> {
        // Unknown roots fail before any store access.
        let root = location.root_key()?;
        let mut entry = build_root::<T>(location.path(), self.config.max_depth)?;

        let handle = self.store.root(root)?;
        debug!(%location, %handle, "decoding");
        populate(self.store, &mut entry, handle, root.full_name())?;
        unmarshal(&mut entry, target, &self.config.codec(), root.full_name())?;

        debug!(%location, values = entry.value_count(), "decoded");
        Ok(())
    }
}

/// Decode `address` from `store` into `target` with the default configuration.
pub fn decode<S, T>(store: &S, address: &str, target: &mut T) -> DecodeResult<()>
where
    S: Store + ?Sized,
    T: Schema + Target,
{
    Decoder::new(store).decode(address, target)
}
