//! Patient record page: data card, citas, odontogramas and shortcuts.

use chrono::{Duration, Local, NaiveDate};
use leptos::*;
use leptos_router::{use_navigate, use_params_map, A};

use crate::client::{self, Cita, ObraSocial, Odontograma, Paciente};
use crate::components::common::{whatsapp_link, Cargando, EstadoCitaBadge, Paginacion};
use crate::components::pacientes::ModalPaciente;
use crate::utils::fechas::formatear_fecha;
use crate::utils::odontograma::numeros_desde_cantidad;

const POR_PAGINA: usize = 5;

/// Parses a free-form tooth list ("11 12, 21") into valid FDI numbers.
fn parsear_numeros(entrada: &str) -> Vec<u8> {
    entrada
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u8>().ok())
        .filter(|n| (11..=85).contains(n))
        .collect()
}

#[component]
pub fn PacienteDetallePage() -> impl IntoView {
    let params = use_params_map();
    let paciente_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (paciente, set_paciente) = create_signal(Option::<Paciente>::None);
    let (obras, set_obras) = create_signal(Vec::<ObraSocial>::new());
    let (citas, set_citas) = create_signal(Vec::<Cita>::new());
    let (proxima, set_proxima) = create_signal(Option::<Cita>::None);
    let (odontogramas, set_odontogramas) = create_signal(Vec::<Odontograma>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (editando, set_editando) = create_signal(false);
    let (refresco, set_refresco) = create_signal(0u32);

    create_effect(move |_| {
        let _ = refresco.get();
        let id = paciente_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::paciente_get(&id).await {
                Ok(p) => set_paciente.set(Some(p)),
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    set_cargando.set(false);
                    return;
                }
            }

            if let Ok(lista) = client::odontogramas_por_paciente(&id).await {
                set_odontogramas.set(lista);
            }

            let hoy = Local::now().date_naive();
            let en_un_mes = hoy + Duration::days(30);
            if let Ok(ventana) = client::citas_list(
                Some(&hoy.format("%Y-%m-%d").to_string()),
                Some(&en_un_mes.format("%Y-%m-%d").to_string()),
                Some(&id),
            )
            .await
            {
                let siguiente = ventana
                    .into_iter()
                    .filter(|c| {
                        NaiveDate::parse_from_str(&c.fecha.chars().take(10).collect::<String>(), "%Y-%m-%d")
                            .map(|f| f >= hoy)
                            .unwrap_or(false)
                    })
                    .min_by(|a, b| (&a.fecha, &a.hora_inicio).cmp(&(&b.fecha, &b.hora_inicio)));
                set_proxima.set(siguiente);
            }

            if let Ok(mut todas) = client::citas_list(None, None, Some(&id)).await {
                todas.sort_by(|a, b| (&b.fecha, &b.hora_inicio).cmp(&(&a.fecha, &a.hora_inicio)));
                set_citas.set(todas);
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

    view! {
        <div class="space-y-6">
            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}
            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                paciente.get().map(|p| {
                    let id = p.id.clone();
                    view! {
                        <FichaPaciente paciente=p.clone() proxima=proxima on_editar=move |_| set_editando.set(true) />
                        <AccesosRapidos paciente_id=id.clone() />
                        <div class="grid lg:grid-cols-2 gap-6">
                            <SeccionCitas citas=citas />
                            <SeccionOdontogramas
                                paciente_id=id
                                odontogramas=odontogramas
                                on_creado=move |_| set_refresco.update(|n| *n += 1)
                            />
                        </div>
                    }.into_view()
                }).unwrap_or_else(|| view! { <Cargando /> }.into_view())
            }}
            {move || editando.get().then(|| {
                paciente.get().map(|p| view! {
                    <ModalPaciente
                        obras=obras.get()
                        paciente=Some(p)
                        on_cerrar=move |_| set_editando.set(false)
                        on_guardado=move |_| {
                            set_editando.set(false);
                            set_refresco.update(|n| *n += 1);
                        }
                    />
                })
            })}
        </div>
    }
}

#[component]
fn FichaPaciente(
    paciente: Paciente,
    proxima: ReadSignal<Option<Cita>>,
    #[prop(into)] on_editar: Callback<()>,
) -> impl IntoView {
    let nombre = paciente.nombre_completo();
    let obra = paciente
        .obra_social
        .as_ref()
        .map(|o| o.nombre.clone())
        .unwrap_or_else(|| "Sin obra social".to_string());
    let telefono = paciente.telefono.clone();

    let dato = |etiqueta: &'static str, valor: String| {
        view! {
            <div>
                <div class="text-xs text-slate-400 uppercase tracking-wide">{etiqueta}</div>
                <div class="text-sm text-slate-700 mt-0.5">{valor}</div>
            </div>
        }
    };

    view! {
        <div class="bg-white rounded-xl shadow p-6">
            <div class="flex items-start justify-between gap-4 flex-wrap">
                <div>
                    <h1 class="text-2xl font-bold text-slate-800">{nombre}</h1>
                    <p class="text-sm text-slate-500 mt-1">{obra}</p>
                </div>
                <div class="flex items-center gap-2">
                    {telefono.map(|t| view! {
                        <a
                            href=whatsapp_link(&t)
                            target="_blank"
                            class="text-sm px-3 py-1.5 rounded-lg border border-green-200 text-green-600 hover:bg-green-50"
                        >
                            "WhatsApp"
                        </a>
                    })}
                    <button
                        class="text-sm px-3 py-1.5 rounded-lg border border-slate-200 text-slate-600 hover:border-[#5fb3b0]"
                        on:click=move |_| on_editar.call(())
                    >
                        "Editar"
                    </button>
                </div>
            </div>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mt-5">
                {dato("DNI", paciente.dni.clone())}
                {dato("Nacimiento", paciente.fecha_nacimiento.as_deref().map(formatear_fecha).unwrap_or_else(|| "-".to_string()))}
                {dato("Teléfono", paciente.telefono.clone().unwrap_or_else(|| "-".to_string()))}
                {dato("Email", paciente.email.clone().unwrap_or_else(|| "-".to_string()))}
                {dato("Dirección", paciente.direccion.clone().unwrap_or_else(|| "-".to_string()))}
                {dato("Alergias", paciente.alergias.clone().unwrap_or_else(|| "-".to_string()))}
                <div class="col-span-2">
                    <div class="text-xs text-slate-400 uppercase tracking-wide">"Próxima cita"</div>
                    <div class="text-sm text-slate-700 mt-0.5">
                        {move || proxima.get()
                            .map(|c| format!("{} {}", formatear_fecha(&c.fecha), c.hora_inicio))
                            .unwrap_or_else(|| "Sin citas programadas".to_string())}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn AccesosRapidos(paciente_id: String) -> impl IntoView {
    let enlaces = [
        ("Notas clínicas", "notas"),
        ("Imágenes", "imagenes"),
        ("Historial", "historial"),
        ("Historia clínica", "historia-clinica"),
    ];
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
            {enlaces.map(|(label, seg)| view! {
                <A
                    href=format!("/pacientes/{paciente_id}/{seg}")
                    class="bg-white rounded-xl shadow px-4 py-3 text-sm font-medium text-slate-600 hover:text-[#5fb3b0] text-center"
                >
                    {label}
                </A>
            }).collect_view()}
        </div>
    }
}

#[component]
fn SeccionCitas(citas: ReadSignal<Vec<Cita>>) -> impl IntoView {
    let (pagina, set_pagina) = create_signal(0usize);

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <h2 class="text-sm font-medium text-slate-500 mb-3">"Citas"</h2>
            {move || {
                let lista = citas.get();
                if lista.is_empty() {
                    view! { <p class="text-sm text-slate-400 py-4 text-center">"Sin citas registradas"</p> }.into_view()
                } else {
                    lista
                        .iter()
                        .skip(pagina.get() * POR_PAGINA)
                        .take(POR_PAGINA)
                        .map(|c| {
                            let c = c.clone();
                            view! {
                                <A
                                    href=format!("/citas/{}", c.id)
                                    class="flex items-center justify-between px-3 py-2 rounded-lg hover:bg-slate-50 text-sm"
                                >
                                    <span class="text-slate-600">
                                        {format!("{} {} - {}", formatear_fecha(&c.fecha), c.hora_inicio, c.hora_fin)}
                                    </span>
                                    <EstadoCitaBadge estado=c.estado />
                                </A>
                            }
                        })
                        .collect_view()
                }
            }}
            <Paginacion
                pagina=pagina
                set_pagina=set_pagina
                total=Signal::derive(move || citas.get().len())
                por_pagina=POR_PAGINA
            />
        </div>
    }
}

#[component]
fn SeccionOdontogramas(
    paciente_id: String,
    odontogramas: ReadSignal<Vec<Odontograma>>,
    #[prop(into)] on_creado: Callback<()>,
) -> impl IntoView {
    let navigate = use_navigate();
    let (pagina, set_pagina) = create_signal(0usize);
    let (mostrar_alta, set_mostrar_alta) = create_signal(false);
    let (titulo, set_titulo) = create_signal(String::new());
    let (cantidad, set_cantidad) = create_signal(Option::<usize>::None);
    let (numeros_libres, set_numeros_libres) = create_signal(String::new());
    let (creando, set_creando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    let crear = move |_| {
        let id = paciente_id.clone();
        let titulo_valor = titulo.get();
        let navigate = navigate.clone();
        let libres = parsear_numeros(&numeros_libres.get());
        let numeros: Option<Vec<u8>> = if !libres.is_empty() {
            Some(libres)
        } else {
            // 32 is the server default, only non-standard counts travel
            cantidad.get().filter(|c| *c != 32).map(numeros_desde_cantidad)
        };
        set_creando.set(true);
        set_error.set(None);
        spawn_local(async move {
            let titulo_opt = (!titulo_valor.trim().is_empty()).then_some(titulo_valor.trim());
            match client::odontograma_create(&id, titulo_opt, None, numeros.as_deref()).await {
                Ok(od) => {
                    on_creado.call(());
                    navigate(&format!("/odontograma/{}", od.id), Default::default());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_creando.set(false);
        });
    };

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <div class="flex items-center justify-between mb-3">
                <h2 class="text-sm font-medium text-slate-500">"Odontogramas"</h2>
                <button
                    class="text-xs px-3 py-1.5 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white font-medium"
                    on:click=move |_| set_mostrar_alta.update(|v| *v = !*v)
                >
                    "+ Nuevo"
                </button>
            </div>

            {move || mostrar_alta.get().then(|| view! {
                <div class="p-3 mb-3 rounded-lg border border-slate-200 space-y-3">
                    <input
                        class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm"
                        placeholder="Título (opcional)"
                        prop:value=move || titulo.get()
                        on:input=move |e| set_titulo.set(event_target_value(&e))
                    />
                    <div class="flex items-center gap-2">
                        <span class="text-xs text-slate-500">"Dientes:"</span>
                        {[8usize, 16, 32, 52].map(|n| view! {
                            <button
                                class=move || format!(
                                    "text-xs px-2 py-1 rounded border {}",
                                    if cantidad.get() == Some(n) {
                                        "border-[#5fb3b0] bg-[#5fb3b0]/10 text-[#5fb3b0]"
                                    } else {
                                        "border-slate-200 text-slate-500"
                                    }
                                )
                                on:click=move |_| set_cantidad.set(Some(n))
                            >
                                {n}
                            </button>
                        }).collect_view()}
                    </div>
                    <input
                        class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm"
                        placeholder="O lista de números: 11 12 21..."
                        prop:value=move || numeros_libres.get()
                        on:input=move |e| set_numeros_libres.set(event_target_value(&e))
                    />
                    {move || error.get().map(|e| view! {
                        <div class="p-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
                    })}
                    <button
                        class="w-full py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                        disabled=move || creando.get()
                        on:click=crear.clone()
                    >
                        {move || if creando.get() { "Creando..." } else { "Crear odontograma" }}
                    </button>
                </div>
            })}

            {move || {
                let lista = odontogramas.get();
                if lista.is_empty() {
                    view! { <p class="text-sm text-slate-400 py-4 text-center">"Sin odontogramas"</p> }.into_view()
                } else {
                    lista
                        .iter()
                        .skip(pagina.get() * POR_PAGINA)
                        .take(POR_PAGINA)
                        .map(|od| {
                            let etiqueta = od.titulo.clone().unwrap_or_else(|| {
                                od.fecha.as_deref().map(formatear_fecha).unwrap_or_else(|| "Odontograma".to_string())
                            });
                            let dientes = od.conteo.as_ref().map(|c| c.dientes).unwrap_or(0);
                            view! {
                                <A
                                    href=format!("/odontograma/{}", od.id)
                                    class="flex items-center justify-between px-3 py-2 rounded-lg hover:bg-slate-50 text-sm"
                                >
                                    <span class="text-slate-600">{etiqueta}</span>
                                    <span class="text-xs text-slate-400">{dientes}" dientes"</span>
                                </A>
                            }
                        })
                        .collect_view()
                }
            }}
            <Paginacion
                pagina=pagina
                set_pagina=set_pagina
                total=Signal::derive(move || odontogramas.get().len())
                por_pagina=POR_PAGINA
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsea_lista_libre() {
        assert_eq!(parsear_numeros("11 12, 21\n48"), vec![11, 12, 21, 48]);
        assert_eq!(parsear_numeros("99 abc 10"), Vec::<u8>::new());
        assert_eq!(parsear_numeros(""), Vec::<u8>::new());
    }
}
