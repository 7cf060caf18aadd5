use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::normalize;
use crate::error::JournalError;
use crate::model::climbing::MAX_PHOTOS;
use crate::model::{
    Climbing, ClimbingDraft, ClimbingGrade, ClimbingPhoto, Journal, Place, PlaceKind, Route, RouteKind,
};
use crate::repository::{JournalRepository, PhotoStorage};
use crate::service::dto::{ClimbingDto, PlaceSummary};

/// Places, routes and climbs with the cascading rules of the journal.
///
/// Every mutation loads the journal, applies the change and saves it back.
pub struct JournalService<R: JournalRepository, P: PhotoStorage> {
    repo: R,
    photos: P,
}

impl<R: JournalRepository, P: PhotoStorage> JournalService<R, P> {
    pub fn new(repo: R, photos: P) -> Self {
        Self { repo, photos }
    }

    pub fn journal(&self) -> Result<Journal> {
        self.repo.load()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn photos(&self) -> &P {
        &self.photos
    }

    // Queries

    pub fn places(&self) -> Result<Vec<Place>> {
        let mut places = self.repo.load()?.places;
        sort_places(&mut places);
        Ok(places)
    }

    pub fn place_summaries(&self) -> Result<Vec<PlaceSummary>> {
        let journal = self.repo.load()?;
        let mut places = journal.places.clone();
        sort_places(&mut places);
        Ok(places.into_iter().map(|p| PlaceSummary::from_entity(p, &journal)).collect())
    }

    pub fn routes(&self) -> Result<Vec<Route>> {
        let mut routes = self.repo.load()?.routes;
        sort_routes(&mut routes);
        Ok(routes)
    }

    /// Routes of one place, easiest first.
    pub fn routes_for(&self, place_id: &Uuid) -> Result<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .repo
            .load()?
            .routes
            .into_iter()
            .filter(|r| r.place_id == *place_id)
            .collect();
        routes.sort_by_key(|r| r.grade.rank());
        Ok(routes)
    }

    pub fn place(&self, id: &Uuid) -> Result<Place> {
        self.repo
            .load()?
            .places
            .into_iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| JournalError::NotFound { kind: "Place", id: *id }.into())
    }

    pub fn route(&self, id: &Uuid) -> Result<Route> {
        self.repo
            .load()?
            .routes
            .into_iter()
            .find(|r| r.id == *id)
            .ok_or_else(|| JournalError::NotFound { kind: "Route", id: *id }.into())
    }

    pub fn climbing(&self, id: &Uuid) -> Result<Climbing> {
        self.repo
            .load()?
            .climbings
            .into_iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| JournalError::NotFound { kind: "Climbing", id: *id }.into())
    }

    pub fn climbings_newest_first(&self) -> Result<Vec<ClimbingDto>> {
        let journal = self.repo.load()?;
        let mut climbings = journal.climbings.clone();
        climbings.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(climbings.iter().map(|c| ClimbingDto::from_entity(c, &journal)).collect())
    }

    /// Climbs on the same calendar day as `day`, newest first.
    pub fn climbings_on(&self, day: NaiveDate) -> Result<Vec<ClimbingDto>> {
        let journal = self.repo.load()?;
        let mut climbings: Vec<&Climbing> = journal
            .climbings
            .iter()
            .filter(|c| normalize(&c.date) == day)
            .collect();
        climbings.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(climbings.into_iter().map(|c| ClimbingDto::from_entity(c, &journal)).collect())
    }

    pub fn has_climbings_on(&self, day: NaiveDate) -> Result<bool> {
        Ok(self.repo.load()?.climbings.iter().any(|c| normalize(&c.date) == day))
    }

    // Places

    pub fn add_place(&self, name: String, kind: PlaceKind, details: String) -> Result<Place> {
        let mut journal = self.repo.load()?;
        let place = Place::new(name, kind, details);
        journal.places.push(place.clone());
        sort_places(&mut journal.places);
        self.repo.save(&journal)?;
        info!(id = %place.id, name = %place.name, "added place");
        Ok(place)
    }

    pub fn update_place(&self, place: &Place) -> Result<()> {
        let mut journal = self.repo.load()?;
        let slot = journal
            .places
            .iter_mut()
            .find(|p| p.id == place.id)
            .ok_or(JournalError::NotFound { kind: "Place", id: place.id })?;
        *slot = place.clone();
        sort_places(&mut journal.places);
        self.repo.save(&journal)
    }

    /// Deletes a place with its routes, every climb on them and their photos.
    pub fn delete_place(&self, id: &Uuid) -> Result<()> {
        let mut journal = self.repo.load()?;
        if !journal.places.iter().any(|p| p.id == *id) {
            return Err(JournalError::NotFound { kind: "Place", id: *id }.into());
        }

        let route_ids: HashSet<Uuid> = journal
            .routes
            .iter()
            .filter(|r| r.place_id == *id)
            .map(|r| r.id)
            .collect();
        let doomed = |c: &Climbing| c.place_id == *id || route_ids.contains(&c.route_id);

        let filenames = photo_filenames(journal.climbings.iter().filter(|&c| doomed(c)));

        let before = journal.climbings.len();
        journal.places.retain(|p| p.id != *id);
        journal.routes.retain(|r| !route_ids.contains(&r.id));
        journal.climbings.retain(|c| !doomed(c));

        info!(
            %id,
            routes = route_ids.len(),
            climbings = before - journal.climbings.len(),
            photos = filenames.len(),
            "deleted place"
        );
        self.save_then_delete(&journal, &filenames)
    }

    // Routes

    pub fn add_route(
        &self,
        place_id: Uuid,
        name: String,
        grade: ClimbingGrade,
        kind: RouteKind,
        details: String,
    ) -> Result<Route> {
        let mut journal = self.repo.load()?;
        if !journal.places.iter().any(|p| p.id == place_id) {
            return Err(JournalError::UnknownPlace(place_id).into());
        }

        let route = Route::new(place_id, name, grade, kind, details);
        journal.routes.push(route.clone());
        sort_routes(&mut journal.routes);
        self.repo.save(&journal)?;
        info!(id = %route.id, name = %route.name, grade = %route.grade, "added route");
        Ok(route)
    }

    pub fn update_route(&self, route: &Route) -> Result<()> {
        let mut journal = self.repo.load()?;
        let slot = journal
            .routes
            .iter_mut()
            .find(|r| r.id == route.id)
            .ok_or(JournalError::NotFound { kind: "Route", id: route.id })?;
        *slot = route.clone();
        sort_routes(&mut journal.routes);
        self.repo.save(&journal)
    }

    /// Deletes a route, every climb on it and their photos.
    pub fn delete_route(&self, id: &Uuid) -> Result<()> {
        let mut journal = self.repo.load()?;
        if !journal.routes.iter().any(|r| r.id == *id) {
            return Err(JournalError::NotFound { kind: "Route", id: *id }.into());
        }

        let filenames = photo_filenames(journal.climbings.iter().filter(|c| c.route_id == *id));

        journal.routes.retain(|r| r.id != *id);
        journal.climbings.retain(|c| c.route_id != *id);

        info!(%id, photos = filenames.len(), "deleted route");
        self.save_then_delete(&journal, &filenames)
    }

    // Climbs

    /// Records a climb. At most three photos are kept; sources that can't
    /// be stored are skipped.
    pub fn add_climbing(&self, draft: ClimbingDraft, photo_sources: &[Vec<u8>]) -> Result<Climbing> {
        let mut journal = self.repo.load()?;
        let photos = self.store_photos(photo_sources);
        let climbing = Climbing::new(draft, photos);

        journal.climbings.push(climbing.clone());
        self.save_or_discard(&journal, &photo_filenames(std::iter::once(&climbing)))?;
        info!(id = %climbing.id, date = %climbing.date, "added climbing");
        Ok(climbing)
    }

    pub fn update_climbing(&self, climbing: &Climbing) -> Result<()> {
        let mut journal = self.repo.load()?;
        let slot = journal
            .climbings
            .iter_mut()
            .find(|c| c.id == climbing.id)
            .ok_or(JournalError::NotFound { kind: "Climbing", id: climbing.id })?;
        let mut before = photo_filenames(std::iter::once(&*slot));
        before.extend(photo_filenames(std::iter::once(climbing)));

        *slot = climbing.clone();
        slot.clamp();

        // Photos cut by the cap or swapped out are no longer referenced.
        let kept = photo_filenames(std::iter::once(&*slot));
        let mut dropped: Vec<String> = before.into_iter().filter(|f| !kept.contains(f)).collect();
        dropped.sort();
        dropped.dedup();

        self.save_then_delete(&journal, &dropped)
    }

    /// Swaps every photo of a climb for the given sources. An empty list
    /// just removes the old photos.
    pub fn replace_climbing_photos(&self, id: &Uuid, photo_sources: &[Vec<u8>]) -> Result<Vec<ClimbingPhoto>> {
        let mut journal = self.repo.load()?;
        let climbing = journal
            .climbings
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or(JournalError::NotFound { kind: "Climbing", id: *id })?;

        let old = photo_filenames(std::iter::once(&*climbing));
        climbing.photos = self.store_photos(photo_sources);
        let photos = climbing.photos.clone();

        let added: Vec<String> = photos.iter().map(|p| p.filename.clone()).collect();
        self.save_or_discard(&journal, &added)?;
        self.photos.delete(&old);
        Ok(photos)
    }

    pub fn delete_climbing(&self, id: &Uuid) -> Result<()> {
        let mut journal = self.repo.load()?;
        let Some(pos) = journal.climbings.iter().position(|c| c.id == *id) else {
            return Err(JournalError::NotFound { kind: "Climbing", id: *id }.into());
        };

        let climbing = journal.climbings.remove(pos);
        info!(%id, "deleted climbing");
        self.save_then_delete(&journal, &photo_filenames(std::iter::once(&climbing)))
    }

    /// Photo files go only once the journal no longer references them.
    fn save_then_delete(&self, journal: &Journal, filenames: &[String]) -> Result<()> {
        self.repo.save(journal)?;
        self.photos.delete(filenames);
        Ok(())
    }

    /// Removes freshly stored photos again when the journal can't be saved.
    fn save_or_discard(&self, journal: &Journal, added: &[String]) -> Result<()> {
        if let Err(e) = self.repo.save(journal) {
            self.photos.delete(added);
            return Err(e);
        }
        Ok(())
    }

    fn store_photos(&self, sources: &[Vec<u8>]) -> Vec<ClimbingPhoto> {
        let mut stored = Vec::new();
        for bytes in sources {
            if stored.len() == MAX_PHOTOS {
                break;
            }
            if bytes.is_empty() {
                warn!("skipped one photo: no image data");
                continue;
            }
            match self.photos.save(bytes) {
                Ok(filename) => stored.push(ClimbingPhoto::new(filename)),
                Err(e) => warn!(error = %e, "skipped one photo: could not save"),
            }
        }
        stored
    }
}

fn sort_places(places: &mut [Place]) {
    places.sort_by_key(|p| p.name.to_lowercase());
}

fn sort_routes(routes: &mut [Route]) {
    routes.sort_by_key(|r| r.name.to_lowercase());
}

fn photo_filenames<'a>(climbings: impl Iterator<Item = &'a Climbing>) -> Vec<String> {
    climbings
        .flat_map(|c| c.photos.iter().map(|p| p.filename.clone()))
        .collect()
}
