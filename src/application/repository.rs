//! Repository - validates requests, derives identity and drives storage.
//!
//! The repository keeps no state of its own. Services are deduplicated on
//! read, never on write; profiles are never deduplicated.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::errors::RepositoryError;
use super::requests::{
    CreateProfileRequest, CreateServiceRequest, GetProfilesRequest, GetServicesRequest,
};
use crate::domain::foundation::Timestamp;
use crate::domain::pprof::DecodedProfile;
use crate::domain::profile::{GetServicesFilter, Profile, Service, Token};
use crate::ports::{ProfileCodec, ProfileStorage};

pub struct Repository {
    storage: Arc<dyn ProfileStorage>,
    codec: Arc<dyn ProfileCodec>,
}

impl Repository {
    pub fn new(storage: Arc<dyn ProfileStorage>, codec: Arc<dyn ProfileCodec>) -> Self {
        Self { storage, codec }
    }

    /// Registers a service build and returns its token.
    pub async fn create_service(
        &self,
        req: &CreateServiceRequest,
    ) -> Result<String, RepositoryError> {
        if let Err(e) = req.validate() {
            warn!(service = %req.service, id = %req.id, "rejected service registration: {}", e);
            return Err(e.into());
        }
        debug!(service = %req.service, id = %req.id, labels = %req.labels, "creating service");

        let service = Service::new(&req.service, &req.id, req.labels.clone());
        self.storage.create_service(&service).await.map_err(|e| {
            RepositoryError::storage(
                "create_service",
                format!("service={} id={}", req.service, req.id),
                e,
            )
        })?;

        Ok(service.token.to_string())
    }

    /// Lists services, one entry per name with labels of every
    /// registration folded together. Result order is unspecified.
    pub async fn get_services(
        &self,
        req: &GetServicesRequest,
    ) -> Result<Vec<Service>, RepositoryError> {
        debug!(service = %req.service, "getting services");

        let filter = GetServicesFilter {
            service: req.service.clone(),
        };
        let services = self.storage.get_services(&filter).await.map_err(|e| {
            RepositoryError::storage("get_services", format!("service={}", req.service), e)
        })?;

        Ok(merge_services(services))
    }

    /// Decodes a submitted profile and hands it to storage.
    ///
    /// The token is not checked against registered services here; that
    /// is left to the storage backend.
    pub async fn create_profile(
        &self,
        req: &CreateProfileRequest,
        data: &[u8],
    ) -> Result<(), RepositoryError> {
        if let Err(e) = req.validate() {
            warn!(id = %req.id, profile_type = %req.profile_type, "rejected profile: {}", e);
            return Err(e.into());
        }
        debug!(
            id = %req.id,
            profile_type = %req.profile_type,
            bytes = data.len(),
            "creating profile"
        );

        let decoded = self.codec.parse(data).map_err(|e| {
            warn!(id = %req.id, token = %req.token, "could not parse profile: {}", e);
            RepositoryError::Decode(e)
        })?;

        let profile = Profile::new(
            req.profile_type,
            &req.id,
            Token::from(req.token.as_str()),
            Timestamp::now(),
        );

        self.storage
            .create_profile(&profile, &decoded)
            .await
            .map_err(|e| {
                RepositoryError::storage(
                    "create_profile",
                    format!(
                        "id={} token={} type={}",
                        req.id, req.token, req.profile_type
                    ),
                    e,
                )
            })
    }

    /// Returns every profile matching the request, in storage order.
    pub async fn get_profiles(
        &self,
        req: &GetProfilesRequest,
    ) -> Result<Vec<DecodedProfile>, RepositoryError> {
        let filter = req.to_filter()?;
        debug!(
            service = %filter.service,
            profile_type = %filter.profile_type,
            from = %filter.created_at_min,
            to = %filter.created_at_max,
            "getting profiles"
        );

        self.storage.get_profiles(&filter).await.map_err(|e| {
            RepositoryError::storage("get_profiles", query_context(req), e)
        })
    }

    /// Returns the single profile matching the request.
    ///
    /// Fails with `ErrorCode::NotFound` when nothing matches and with
    /// `ErrorCode::AmbiguousMatch` when more than one profile does.
    pub async fn get_profile(
        &self,
        req: &GetProfilesRequest,
    ) -> Result<DecodedProfile, RepositoryError> {
        let filter = req.to_filter()?;
        debug!(
            service = %filter.service,
            profile_type = %filter.profile_type,
            "getting profile"
        );

        self.storage
            .get_profile(&filter)
            .await
            .map_err(|e| RepositoryError::storage("get_profile", query_context(req), e))
    }

    /// Writes every matching profile into a zip archive.
    ///
    /// Entries are named `<service>-<type>-<NNNN>.prof` in query order. A
    /// failed entry aborts the export without writing the archive trailer;
    /// bytes already written stay written.
    pub async fn get_profiles_to<W>(
        &self,
        req: &GetProfilesRequest,
        writer: W,
    ) -> Result<(), RepositoryError>
    where
        W: Write + Send,
    {
        let profiles = self.get_profiles(req).await?;

        let aborted = Arc::new(AtomicBool::new(false));
        let mut zip = ZipWriter::new_stream(ExportSink::new(writer, aborted.clone()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (n, profile) in profiles.iter().enumerate() {
            let name = archive_entry_name(req, n + 1);
            let written = zip
                .start_file(name.as_str(), options)
                .map_err(|e| RepositoryError::write(format!("zip entry {}", name), e))
                .and_then(|()| {
                    self.codec
                        .write(profile, &mut zip)
                        .map_err(|e| RepositoryError::write(format!("zip entry {}", name), e))
                });
            if let Err(e) = written {
                // Dropping the writer must not finalize the archive.
                aborted.store(true, Ordering::SeqCst);
                warn!(service = %req.service, entry = %name, "export aborted: {}", e);
                return Err(e);
            }
        }

        zip.finish()
            .map_err(|e| RepositoryError::write("zip archive", e))?;
        Ok(())
    }

    /// Writes the single matching profile in its native form.
    pub async fn get_profile_to<W>(
        &self,
        req: &GetProfilesRequest,
        mut writer: W,
    ) -> Result<(), RepositoryError>
    where
        W: Write + Send,
    {
        let profile = self.get_profile(req).await?;
        self.codec
            .write(&profile, &mut writer)
            .map_err(|e| RepositoryError::write("profile", e))
    }
}

/// Output side of an archive export. Once the export is aborted every
/// write fails, so nothing past the failed entry reaches the caller.
struct ExportSink<W> {
    inner: W,
    aborted: Arc<AtomicBool>,
}

impl<W> ExportSink<W> {
    fn new(inner: W, aborted: Arc<AtomicBool>) -> Self {
        Self { inner, aborted }
    }

    fn check(&self) -> io::Result<()> {
        if self.aborted.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "export aborted"));
        }
        Ok(())
    }
}

impl<W: Write> Write for ExportSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check()?;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check()?;
        self.inner.flush()
    }
}

fn archive_entry_name(req: &GetProfilesRequest, seq: usize) -> String {
    format!("{}-{}-{:04}.prof", req.service, req.profile_type, seq)
}

fn query_context(req: &GetProfilesRequest) -> String {
    format!("service={} type={}", req.service, req.profile_type)
}

/// Folds registrations sharing a name into one service whose labels are
/// the union of all of them. The first registration seen for a name is
/// kept as the representative.
fn merge_services(services: Vec<Service>) -> Vec<Service> {
    if services.is_empty() {
        return services;
    }

    let mut by_name: HashMap<String, Service> = HashMap::with_capacity(services.len());
    for service in services {
        match by_name.entry(service.name.clone()) {
            Entry::Occupied(mut entry) => {
                let representative = entry.get_mut();
                representative.labels = representative.labels.add(&service.labels);
            }
            Entry::Vacant(entry) => {
                entry.insert(service);
            }
        }
    }

    by_name.into_values().collect()
}
