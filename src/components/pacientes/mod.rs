//! Patient management: list, search, create and edit.

mod detalle;
mod historial;
mod imagenes;
mod notas;

pub use detalle::PacienteDetallePage;
pub use historial::PacienteHistorialPage;
pub use imagenes::PacienteImagenesPage;
pub use notas::PacienteNotasPage;

use leptos::*;
use leptos_router::A;

use crate::client::{self, ObraSocial, Paciente};
use crate::components::common::{whatsapp_link, Cargando, ErrorBanner};

/// Collects the form signals into the JSON body the API expects.
fn cuerpo_paciente(
    nombre: &str,
    apellido: &str,
    dni: &str,
    fecha_nacimiento: &str,
    telefono: &str,
    email: &str,
    direccion: &str,
    obra_social_id: &str,
    alergias: &str,
) -> serde_json::Value {
    let opcional = |v: &str| {
        let v = v.trim();
        if v.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(v.to_string())
        }
    };
    serde_json::json!({
        "nombre": nombre.trim(),
        "apellido": apellido.trim(),
        "dni": dni.trim(),
        "fechaNacimiento": opcional(fecha_nacimiento),
        "telefono": opcional(telefono),
        "email": opcional(email),
        "direccion": opcional(direccion),
        "obraSocialId": opcional(obra_social_id),
        "alergias": opcional(alergias),
    })
}

#[component]
pub fn PacientesPage() -> impl IntoView {
    let (busqueda, set_busqueda) = create_signal(String::new());
    let (pacientes, set_pacientes) = create_signal(Vec::<Paciente>::new());
    let (obras, set_obras) = create_signal(Vec::<ObraSocial>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (mostrar_alta, set_mostrar_alta) = create_signal(false);
    let (editando, set_editando) = create_signal(Option::<Paciente>::None);
    let (refresco, set_refresco) = create_signal(0u32);

    create_effect(move |_| {
        let _ = refresco.get();
        let termino = busqueda.get();
        spawn_local(async move {
            set_cargando.set(true);
            match client::pacientes_list(Some(&termino)).await {
                Ok(lista) => {
                    set_pacientes.set(lista);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(lista) = client::obras_sociales_list().await {
                set_obras.set(lista);
            }
        });
    });

    let refrescar = move || set_refresco.update(|n| *n += 1);

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between gap-4 flex-wrap">
                <h1 class="text-2xl font-bold text-slate-800">"Pacientes"</h1>
                <div class="flex items-center gap-3">
                    <input
                        type="search"
                        placeholder="Buscar por nombre o DNI..."
                        class="px-3 py-2 rounded-lg border border-slate-200 text-sm w-64 focus:outline-none focus:ring-2 focus:ring-[#5fb3b0]"
                        prop:value=move || busqueda.get()
                        on:input=move |e| set_busqueda.set(event_target_value(&e))
                    />
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium"
                        on:click=move |_| set_mostrar_alta.set(true)
                    >
                        "+ Nuevo paciente"
                    </button>
                </div>
            </div>

            <ErrorBanner mensaje=Signal::derive(move || error.get()) />

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = pacientes.get();
                if lista.is_empty() {
                    view! {
                        <div class="bg-white rounded-xl shadow py-12 text-center text-slate-400 text-sm">
                            "No se encontraron pacientes"
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="bg-white rounded-xl shadow overflow-x-auto">
                            <table class="w-full text-sm">
                                <thead class="bg-slate-50 text-left text-xs text-slate-500 uppercase tracking-wide">
                                    <tr>
                                        <th class="px-4 py-3 font-medium">"Nombre"</th>
                                        <th class="px-4 py-3 font-medium">"DNI"</th>
                                        <th class="px-4 py-3 font-medium">"Obra social"</th>
                                        <th class="px-4 py-3 font-medium">"Contacto"</th>
                                        <th class="px-4 py-3 font-medium">"Citas"</th>
                                        <th class="px-4 py-3 font-medium text-right">"Acciones"</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    {lista.into_iter().map(|p| {
                                        let para_editar = p.clone();
                                        let nombre = p.nombre_completo();
                                        let obra = p.obra_social.as_ref().map(|o| o.nombre.clone()).unwrap_or_else(|| "-".to_string());
                                        let citas = p.conteo.as_ref().map(|c| c.citas).unwrap_or(0);
                                        view! {
                                            <tr class="hover:bg-slate-50">
                                                <td class="px-4 py-3 font-medium text-slate-700">{nombre}</td>
                                                <td class="px-4 py-3 text-slate-500">{p.dni.clone()}</td>
                                                <td class="px-4 py-3 text-slate-500">{obra}</td>
                                                <td class="px-4 py-3 text-slate-500">
                                                    {p.telefono.clone().unwrap_or_else(|| p.email.clone().unwrap_or_else(|| "-".to_string()))}
                                                </td>
                                                <td class="px-4 py-3 text-slate-500">{citas}</td>
                                                <td class="px-4 py-3">
                                                    <div class="flex items-center justify-end gap-2">
                                                        <A
                                                            href=format!("/pacientes/{}", p.id)
                                                            class="text-xs px-2 py-1 rounded border border-slate-200 text-slate-600 hover:border-[#5fb3b0]"
                                                        >
                                                            "Ver ficha"
                                                        </A>
                                                        <button
                                                            class="text-xs px-2 py-1 rounded border border-slate-200 text-slate-600 hover:border-[#5fb3b0]"
                                                            on:click=move |_| set_editando.set(Some(para_editar.clone()))
                                                        >
                                                            "Editar"
                                                        </button>
                                                        {p.telefono.clone().map(|t| view! {
                                                            <a
                                                                href=whatsapp_link(&t)
                                                                target="_blank"
                                                                class="text-xs px-2 py-1 rounded border border-green-200 text-green-600 hover:bg-green-50"
                                                            >
                                                                "WhatsApp"
                                                            </a>
                                                        })}
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }.into_view()
                }
            }}

            {move || mostrar_alta.get().then(|| view! {
                <ModalPaciente
                    obras=obras.get()
                    paciente=None
                    on_cerrar=move |_| set_mostrar_alta.set(false)
                    on_guardado=move |_| {
                        set_mostrar_alta.set(false);
                        refrescar();
                    }
                />
            })}

            {move || editando.get().map(|p| view! {
                <ModalPaciente
                    obras=obras.get()
                    paciente=Some(p)
                    on_cerrar=move |_| set_editando.set(None)
                    on_guardado=move |_| {
                        set_editando.set(None);
                        refrescar();
                    }
                />
            })}
        </div>
    }
}

/// Create/edit modal; with `paciente` set it loads the full record first
/// and saves with an update.
#[component]
pub fn ModalPaciente(
    obras: Vec<ObraSocial>,
    paciente: Option<Paciente>,
    #[prop(into)] on_cerrar: Callback<()>,
    #[prop(into)] on_guardado: Callback<()>,
) -> impl IntoView {
    let es_edicion = paciente.is_some();
    let id_edicion = paciente.as_ref().map(|p| p.id.clone());

    let (nombre, set_nombre) = create_signal(paciente.as_ref().map(|p| p.nombre.clone()).unwrap_or_default());
    let (apellido, set_apellido) = create_signal(paciente.as_ref().map(|p| p.apellido.clone()).unwrap_or_default());
    let (dni, set_dni) = create_signal(paciente.as_ref().map(|p| p.dni.clone()).unwrap_or_default());
    let (fecha_nacimiento, set_fecha_nacimiento) = create_signal(
        paciente.as_ref().and_then(|p| p.fecha_nacimiento.clone()).map(|f| f.chars().take(10).collect::<String>()).unwrap_or_default(),
    );
    let (telefono, set_telefono) = create_signal(paciente.as_ref().and_then(|p| p.telefono.clone()).unwrap_or_default());
    let (email, set_email) = create_signal(paciente.as_ref().and_then(|p| p.email.clone()).unwrap_or_default());
    let (direccion, set_direccion) = create_signal(paciente.as_ref().and_then(|p| p.direccion.clone()).unwrap_or_default());
    let (alergias, set_alergias) = create_signal(paciente.as_ref().and_then(|p| p.alergias.clone()).unwrap_or_default());
    let (obra_social_id, set_obra_social_id) = create_signal(
        paciente
            .as_ref()
            .and_then(|p| p.obra_social_id.clone().or_else(|| p.obra_social.as_ref().and_then(|o| o.id.clone())))
            .unwrap_or_default(),
    );
    let (guardando, set_guardando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    // edit opens from a list row that may miss detail fields
    if let Some(id) = id_edicion.clone() {
        spawn_local(async move {
            if let Ok(p) = client::paciente_get(&id).await {
                set_fecha_nacimiento.set(p.fecha_nacimiento.map(|f| f.chars().take(10).collect()).unwrap_or_default());
                set_telefono.set(p.telefono.unwrap_or_default());
                set_email.set(p.email.unwrap_or_default());
                set_direccion.set(p.direccion.unwrap_or_default());
                set_alergias.set(p.alergias.unwrap_or_default());
                set_obra_social_id.set(
                    p.obra_social_id
                        .or_else(|| p.obra_social.and_then(|o| o.id))
                        .unwrap_or_default(),
                );
            }
        });
    }

    let guardar = move |_| {
        let cuerpo = cuerpo_paciente(
            &nombre.get(),
            &apellido.get(),
            &dni.get(),
            &fecha_nacimiento.get(),
            &telefono.get(),
            &email.get(),
            &direccion.get(),
            &obra_social_id.get(),
            &alergias.get(),
        );
        let id = id_edicion.clone();
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            let resultado = match id {
                Some(id) => client::paciente_update(&id, &cuerpo).await,
                None => client::paciente_create(&cuerpo).await,
            };
            match resultado {
                Ok(_) => on_guardado.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let incompleto = move || {
        nombre.get().trim().is_empty()
            || apellido.get().trim().is_empty()
            || dni.get().trim().is_empty()
            || fecha_nacimiento.get().trim().is_empty()
    };

    let campo = "w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:ring-2 focus:ring-[#5fb3b0]";

    view! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 px-4">
            <div class="bg-white rounded-xl w-full max-w-lg shadow-xl max-h-[90vh] overflow-y-auto">
                <div class="flex items-center justify-between p-4 border-b border-slate-100">
                    <h2 class="text-lg font-semibold text-slate-800">
                        {if es_edicion { "Editar paciente" } else { "Nuevo paciente" }}
                    </h2>
                    <button
                        class="p-1.5 rounded-lg text-slate-400 hover:bg-slate-100"
                        on:click=move |_| on_cerrar.call(())
                    >
                        "✕"
                    </button>
                </div>
                <div class="p-4 grid grid-cols-2 gap-3">
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Nombre *"</label>
                        <input class=campo prop:value=move || nombre.get()
                            on:input=move |e| set_nombre.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Apellido *"</label>
                        <input class=campo prop:value=move || apellido.get()
                            on:input=move |e| set_apellido.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"DNI *"</label>
                        <input class=campo prop:value=move || dni.get()
                            on:input=move |e| set_dni.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Fecha de nacimiento *"</label>
                        <input type="date" class=campo prop:value=move || fecha_nacimiento.get()
                            on:input=move |e| set_fecha_nacimiento.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Teléfono"</label>
                        <input class=campo prop:value=move || telefono.get()
                            on:input=move |e| set_telefono.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Email"</label>
                        <input type="email" class=campo prop:value=move || email.get()
                            on:input=move |e| set_email.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1 col-span-2">
                        <label class="text-sm text-slate-600">"Dirección"</label>
                        <input class=campo prop:value=move || direccion.get()
                            on:input=move |e| set_direccion.set(event_target_value(&e)) />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Obra social"</label>
                        <select class=campo
                            prop:value=move || obra_social_id.get()
                            on:change=move |e| set_obra_social_id.set(event_target_value(&e))
                        >
                            <option value="">"Sin obra social"</option>
                            {obras.into_iter().map(|o| view! {
                                <option value=o.id.clone()>{o.nombre.clone()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Alergias"</label>
                        <input class=campo prop:value=move || alergias.get()
                            on:input=move |e| set_alergias.set(event_target_value(&e)) />
                    </div>
                    {move || error.get().map(|e| view! {
                        <div class="col-span-2 p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">
                            {e}
                        </div>
                    })}
                </div>
                <div class="p-4 border-t border-slate-100 flex justify-end gap-3">
                    <button
                        class="px-4 py-2 rounded-lg border border-slate-200 text-sm text-slate-600"
                        on:click=move |_| on_cerrar.call(())
                    >
                        "Cancelar"
                    </button>
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                        disabled=move || guardando.get() || incompleto()
                        on:click=guardar
                    >
                        {move || if guardando.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
